use {
    crate::{
        config::PriceLike,
        models::PriceSeries,
    },
    chrono::NaiveDate,
    serde::{Deserialize, Serialize},
};

/// One `{ds, y}` observation fed to the forecaster.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainingRow {
    pub ds: NaiveDate,
    pub y: f64,
}

/// Two-column view of a PriceSeries in the forecaster's schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingFrame {
    pub rows: Vec<TrainingRow>,
}

impl TrainingFrame {
    /// Selects Date and Close and renames them to `ds` / `y`. Total: an empty
    /// series gives an empty frame.
    pub fn from_series(series: &PriceSeries) -> Self {
        let rows = series
            .dates
            .iter()
            .zip(&series.close_prices)
            .map(|(&ds, close)| TrainingRow {
                ds,
                y: close.value(),
            })
            .collect();
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::{BaseVol, ClosePrice, HighPrice, LowPrice, OpenPrice},
        domain::Symbol,
        models::PriceRecord,
    };

    fn series(symbol: Symbol, closes: &[f64]) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2022, 5, 1).unwrap();
        PriceSeries::from_records(
            symbol,
            closes.iter().enumerate().map(|(i, &c)| PriceRecord {
                date: start + chrono::Duration::days(i as i64),
                open: OpenPrice::new(c * 0.99),
                high: HighPrice::new(c * 1.02),
                low: LowPrice::new(c * 0.97),
                close: ClosePrice::new(c),
                volume: BaseVol::new(1.0),
            }),
        )
    }

    #[test]
    fn adapter_keeps_dates_and_closes_only() {
        let s = series(Symbol::BtcUsd, &[100.0, 101.5, 99.0]);
        let frame = TrainingFrame::from_series(&s);

        assert_eq!(frame.len(), 3);
        let row = serde_json::to_value(frame.rows[0]).unwrap();
        let fields: Vec<&str> = row.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(fields, ["ds", "y"]);
        assert_eq!(frame.rows[1].ds, s.dates[1]);
        assert_eq!(frame.rows[1].y, 101.5);
    }

    #[test]
    fn equal_length_series_give_equal_length_frames() {
        let a = TrainingFrame::from_series(&series(Symbol::BtcUsd, &[1.0, 2.0, 3.0, 4.0]));
        let b = TrainingFrame::from_series(&series(Symbol::EthUsd, &[9.0, 8.0, 7.0, 6.0]));
        assert_eq!(a.len(), b.len());
    }

    #[test]
    fn empty_series_gives_empty_frame() {
        let frame = TrainingFrame::from_series(&PriceSeries::empty(Symbol::AdaUsd));
        assert!(frame.is_empty());
    }
}
