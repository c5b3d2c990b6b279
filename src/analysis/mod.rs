// Forecasting models
mod additive;
mod forecaster;

pub use additive::{AdditiveForecaster, FittedModel};
pub use forecaster::{ForecastError, Forecaster};
