//! Strongly typed values shared across the pipeline.

use serde::{Deserialize, Serialize};
use std::ops::Sub;

use crate::config::DASHBOARD;

/// A behavioral contract for anything that behaves like a price.
pub trait PriceLike {
    fn value(&self) -> f64;

    const MIN_EPSILON: f64 = 1e-12;

    fn is_positive(&self) -> bool {
        self.value() > Self::MIN_EPSILON
    }

    /// Formats a price with "Trader Precision" adaptive decimals.
    fn format_price(&self) -> String {
        let price = self.value();
        if price == 0.0 {
            return "$0.00".to_string();
        }

        let abs_price = price.abs();

        if abs_price >= 1000.0 {
            format!("${:.2}", price)
        } else if abs_price >= 1.0 {
            format!("${:.4}", price)
        } else if abs_price >= 0.01 {
            format!("${:.5}", price)
        } else {
            format!("${:.8}", price)
        }
    }
}

macro_rules! define_price_type {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Default)]
        #[serde(transparent)]
        pub struct $name(f64);

        impl From<f64> for $name {
            fn from(v: f64) -> Self {
                $name::new(v)
            }
        }

        impl $name {
            pub const fn new(val: f64) -> Self {
                // Absolute prices should not be negative
                let v = if val < 0.0 { 0.0 } else { val };
                Self(v)
            }
        }

        impl Sub for $name {
            type Output = f64;

            fn sub(self, rhs: Self) -> Self::Output {
                self.value() - rhs.value()
            }
        }

        impl PriceLike for $name {
            fn value(&self) -> f64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.format_price())
            }
        }
    };
}

define_price_type!(OpenPrice);
define_price_type!(HighPrice);
define_price_type!(LowPrice);
define_price_type!(ClosePrice);

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct BaseVol(f64);

impl BaseVol {
    pub const fn new(val: f64) -> Self {
        let v = if val < 0.0 { 0.0 } else { val };
        Self(v)
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl std::fmt::Display for BaseVol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let val = self.0;
        if val >= 1_000_000.0 {
            write!(f, "{:.1}M", val / 1_000_000.0)
        } else if val >= 1_000.0 {
            write!(f, "{:.0}K", val / 1_000.0)
        } else {
            write!(f, "{:.2}", val)
        }
    }
}

/// Forecast horizon in whole years, clamped to the slider bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HorizonYears(u32);

impl HorizonYears {
    pub const fn new(years: u32) -> Self {
        let (min, max) = DASHBOARD.horizon_years;
        let v = if years < min {
            min
        } else if years > max {
            max
        } else {
            years
        };
        Self(v)
    }

    #[inline]
    pub fn value(self) -> u32 {
        self.0
    }

    /// Number of daily periods the forecaster extrapolates.
    pub fn periods(self) -> usize {
        self.0 as usize * DASHBOARD.days_per_year
    }
}

impl Default for HorizonYears {
    fn default() -> Self {
        Self::new(DASHBOARD.horizon_years.0)
    }
}

impl std::fmt::Display for HorizonYears {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0 == 1 {
            write!(f, "1 year")
        } else {
            write!(f, "{} years", self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizon_is_clamped_to_slider_bounds() {
        assert_eq!(HorizonYears::new(0).value(), 1);
        assert_eq!(HorizonYears::new(3).value(), 3);
        assert_eq!(HorizonYears::new(9).value(), 4);
    }

    #[test]
    fn horizon_periods_are_whole_years_of_days() {
        for years in 1..=4 {
            assert_eq!(HorizonYears::new(years).periods(), years as usize * 365);
        }
    }

    #[test]
    fn prices_never_go_negative() {
        assert_eq!(ClosePrice::new(-3.0).value(), 0.0);
        assert_eq!(BaseVol::new(-1.0).value(), 0.0);
        assert_eq!(OpenPrice::new(12.5) - OpenPrice::new(2.5), 10.0);
    }

    #[test]
    fn price_formatting_adapts_precision() {
        assert_eq!(ClosePrice::new(43_210.987).to_string(), "$43210.99");
        assert_eq!(ClosePrice::new(0.123456).to_string(), "$0.12346");
        assert_eq!(ClosePrice::new(0.0).to_string(), "$0.00");
    }
}
