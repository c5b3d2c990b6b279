use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of the forecast table, history rows first then future rows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastRow {
    pub ds: NaiveDate,
    pub trend: f64,
    pub trend_lower: f64,
    pub trend_upper: f64,
    pub yhat_lower: f64,
    pub yhat_upper: f64,
    /// weekly + yearly
    pub additive_terms: f64,
    pub weekly: f64,
    pub yearly: f64,
    pub yhat: f64,
}

/// Seasonal effect over exactly one period, for the components chart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeasonalProfiles {
    /// Monday first, 7 entries
    pub weekly: Option<Vec<f64>>,
    /// Day of year 1..=365
    pub yearly: Option<Vec<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub rows: Vec<ForecastRow>,
    /// Leading rows that cover the training history
    pub history_len: usize,
    pub profiles: SeasonalProfiles,
}

impl ForecastResult {
    pub fn history(&self) -> &[ForecastRow] {
        &self.rows[..self.history_len]
    }

    pub fn future(&self) -> &[ForecastRow] {
        &self.rows[self.history_len..]
    }

    pub fn last_history_date(&self) -> Option<NaiveDate> {
        self.history().last().map(|r| r.ds)
    }
}
