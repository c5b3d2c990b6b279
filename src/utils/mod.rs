mod maths_utils;
mod perf;
mod time_utils;

pub use time_utils::{
    AppInstant, TimeUtils, date_from_epoch_days, date_to_epoch_ms, days_since_epoch,
    epoch_ms_to_date, format_date, format_duration, today_local,
};

pub(crate) use maths_utils::mean_and_stddev;
