use chrono::NaiveDate;

use crate::config::{BaseVol, ClosePrice, HighPrice, LowPrice, OpenPrice};
use crate::utils::epoch_ms_to_date;

/// One daily kline as delivered by a market-data provider.
#[derive(Debug, Clone, PartialEq)]
pub struct Candle {
    pub timestamp_ms: i64,

    pub open_price: OpenPrice,
    pub high_price: HighPrice,
    pub low_price: LowPrice,
    pub close_price: ClosePrice,

    pub base_asset_volume: BaseVol,
}

impl Candle {
    pub fn new(
        timestamp_ms: i64,
        open: OpenPrice,
        high: HighPrice,
        low: LowPrice,
        close: ClosePrice,
        base_vol: BaseVol,
    ) -> Self {
        Candle {
            timestamp_ms,
            open_price: open,
            high_price: high,
            low_price: low,
            close_price: close,
            base_asset_volume: base_vol,
        }
    }

    /// UTC trading day the candle opened on.
    pub fn date(&self) -> Option<NaiveDate> {
        epoch_ms_to_date(self.timestamp_ms)
    }
}
