use chrono::{DateTime, Local, NaiveDate};

pub type AppInstant = web_time::Instant;

pub struct TimeUtils;

impl TimeUtils {
    pub const MS_IN_S: i64 = 1000;
    pub const MS_IN_MIN: i64 = Self::MS_IN_S * 60;
    pub const MS_IN_H: i64 = Self::MS_IN_MIN * 60;
    pub const MS_IN_D: i64 = Self::MS_IN_H * 24;
    pub const STANDARD_TIME_FORMAT: &str = "%Y-%m-%d";

    /// Binance-style shorthand for the intervals the loader requests.
    pub fn interval_to_string(interval_ms: i64) -> &'static str {
        match interval_ms {
            Self::MS_IN_D => "1d",
            _ => "unknown",
        }
    }
}

// Date helper functions. All dates are UTC calendar days.

fn unix_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default()
}

/// Midnight UTC of `date` as epoch milliseconds.
pub fn date_to_epoch_ms(date: NaiveDate) -> i64 {
    days_since_epoch(date) * TimeUtils::MS_IN_D
}

/// Calendar day (UTC) containing `epoch_ms`.
pub fn epoch_ms_to_date(epoch_ms: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp_millis(epoch_ms).map(|dt| dt.date_naive())
}

pub fn days_since_epoch(date: NaiveDate) -> i64 {
    (date - unix_epoch()).num_days()
}

/// Inverse of `days_since_epoch`, rounding to the nearest day. Used by plot axes.
pub fn date_from_epoch_days(days: f64) -> Option<NaiveDate> {
    if !days.is_finite() {
        return None;
    }
    unix_epoch().checked_add_signed(chrono::Duration::days(days.round() as i64))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(TimeUtils::STANDARD_TIME_FORMAT).to_string()
}

/// The end of every data request: today on the local calendar.
pub fn today_local() -> NaiveDate {
    Local::now().date_naive()
}

pub fn format_duration(ms: i64) -> String {
    let secs = ms / 1000;
    if secs < 60 {
        return format!("{}s", secs);
    }
    let mins = secs / 60;
    if mins < 60 {
        return format!("{}m {}s", mins, secs % 60);
    }
    let hours = mins / 60;
    format!("{}h {}m", hours, mins % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn epoch_ms_round_trips_through_dates() {
        let date = ymd(2018, 1, 1);
        let ms = date_to_epoch_ms(date);
        assert_eq!(ms, 1_514_764_800_000);
        assert_eq!(epoch_ms_to_date(ms), Some(date));
        assert_eq!(epoch_ms_to_date(ms + TimeUtils::MS_IN_D - 1), Some(date));
    }

    #[test]
    fn plot_axis_days_map_back_to_dates() {
        let date = ymd(2021, 6, 15);
        let days = days_since_epoch(date) as f64;
        assert_eq!(date_from_epoch_days(days + 0.4), Some(date));
        assert_eq!(date_from_epoch_days(f64::NAN), None);
    }

    #[test]
    fn durations_are_compact() {
        assert_eq!(format_duration(4_500), "4s");
        assert_eq!(format_duration(125_000), "2m 5s");
        assert_eq!(format_duration(3_660_000), "1h 1m");
    }
}
