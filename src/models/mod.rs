mod forecast;
mod price_series;
mod training_frame;

pub use forecast::{ForecastResult, ForecastRow, SeasonalProfiles};
pub use price_series::{PriceRecord, PriceSeries};
pub use training_frame::{TrainingFrame, TrainingRow};
