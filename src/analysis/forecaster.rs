use {
    crate::models::{ForecastResult, TrainingFrame},
    chrono::NaiveDate,
    std::{error::Error, fmt},
};

/// A model that learns from a `{ds, y}` frame and extrapolates it day by day.
///
/// `fit` consumes the training frame and produces an owned fitted state;
/// `predict` returns one row per history date followed by `periods` future
/// rows on consecutive calendar days after the last history date.
pub trait Forecaster {
    type Model;

    fn fit(&self, frame: &TrainingFrame) -> Result<Self::Model, ForecastError>;

    fn predict(&self, model: &Self::Model, periods: usize) -> Result<ForecastResult, ForecastError>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum ForecastError {
    InsufficientData { rows: usize, required: usize },
    ZeroSpan(NaiveDate),
    NonFiniteValue(NaiveDate),
    InvalidIntervalWidth(f64),
    Singular,
    DateOutOfRange,
}

impl fmt::Display for ForecastError {
    fn fmt(&self, f: &mut fmt::Formatter) -> std::fmt::Result {
        match self {
            ForecastError::InsufficientData { rows, required } => write!(
                f,
                "Not enough history to fit: {} rows (need at least {})",
                rows, required
            ),
            ForecastError::ZeroSpan(date) => {
                write!(f, "All history falls on a single day ({})", date)
            }
            ForecastError::NonFiniteValue(date) => write!(f, "Non-finite price on {}", date),
            ForecastError::InvalidIntervalWidth(w) => {
                write!(f, "Interval width must be within (0, 1), got {}", w)
            }
            ForecastError::Singular => write!(f, "Model design matrix is singular"),
            ForecastError::DateOutOfRange => write!(f, "Forecast dates overflow the calendar"),
        }
    }
}

impl Error for ForecastError {}
