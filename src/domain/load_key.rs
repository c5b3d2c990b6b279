use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::Symbol;
use crate::utils::format_date;

/// Normalized (symbol, start, end) triple. Both dates are inclusive UTC days.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub struct LoadKey {
    pub symbol: Symbol,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl LoadKey {
    pub fn new(symbol: Symbol, start: NaiveDate, end: NaiveDate) -> Self {
        Self { symbol, start, end }
    }

    /// A start after the end selects nothing.
    pub fn is_empty_range(&self) -> bool {
        self.start > self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl std::fmt::Display for LoadKey {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} [{} .. {}]",
            self.symbol,
            format_date(self.start),
            format_date(self.end)
        )
    }
}
