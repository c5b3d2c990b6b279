use {
    crate::{
        config::{BaseVol, ClosePrice, HighPrice, LowPrice, OpenPrice},
        domain::{Candle, LoadKey, Symbol},
    },
    chrono::NaiveDate,
    itertools::izip,
    serde::{Deserialize, Serialize},
    std::ops::Range,
};

/// One row of the flat (date-as-column) price table. Field order is the CSV column order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PriceRecord {
    pub date: NaiveDate,
    pub open: OpenPrice,
    pub high: HighPrice,
    pub low: LowPrice,
    pub close: ClosePrice,
    pub volume: BaseVol,
}

/// Daily OHLCV table for one symbol, stored column-wise and sorted by date.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PriceSeries {
    pub symbol: Symbol,
    pub dates: Vec<NaiveDate>,
    pub open_prices: Vec<OpenPrice>,
    pub high_prices: Vec<HighPrice>,
    pub low_prices: Vec<LowPrice>,
    pub close_prices: Vec<ClosePrice>,
    pub volumes: Vec<BaseVol>,
}

impl PriceSeries {
    pub fn empty(symbol: Symbol) -> Self {
        Self {
            symbol,
            dates: vec![],
            open_prices: vec![],
            high_prices: vec![],
            low_prices: vec![],
            close_prices: vec![],
            volumes: vec![],
        }
    }

    /// Builds the table for `key` out of raw provider candles.
    /// Rows are sorted by date, one row per day (first candle wins) and
    /// restricted to `key.start..=key.end`.
    pub fn from_candles(key: &LoadKey, mut candles: Vec<Candle>) -> Self {
        candles.sort_by_key(|c| c.timestamp_ms);

        let mut series = Self::empty(key.symbol);
        let len = candles.len();
        series.dates.reserve(len);
        series.open_prices.reserve(len);
        series.high_prices.reserve(len);
        series.low_prices.reserve(len);
        series.close_prices.reserve(len);
        series.volumes.reserve(len);

        for c in candles {
            let Some(date) = c.date() else {
                log::warn!("{}: dropping candle with invalid timestamp {}", key, c.timestamp_ms);
                continue;
            };
            if !key.contains(date) || series.last_date() == Some(date) {
                continue;
            }
            series.push(PriceRecord {
                date,
                open: c.open_price,
                high: c.high_price,
                low: c.low_price,
                close: c.close_price,
                volume: c.base_asset_volume,
            });
        }

        series
    }

    pub fn from_records(symbol: Symbol, records: impl IntoIterator<Item = PriceRecord>) -> Self {
        let mut series = Self::empty(symbol);
        for record in records {
            series.push(record);
        }
        series
    }

    fn push(&mut self, record: PriceRecord) {
        self.dates.push(record.date);
        self.open_prices.push(record.open);
        self.high_prices.push(record.high);
        self.low_prices.push(record.low);
        self.close_prices.push(record.close);
        self.volumes.push(record.volume);
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    pub fn record(&self, idx: usize) -> PriceRecord {
        PriceRecord {
            date: self.dates[idx],
            open: self.open_prices[idx],
            high: self.high_prices[idx],
            low: self.low_prices[idx],
            close: self.close_prices[idx],
            volume: self.volumes[idx],
        }
    }

    pub fn records(&self) -> impl Iterator<Item = PriceRecord> + '_ {
        izip!(
            &self.dates,
            &self.open_prices,
            &self.high_prices,
            &self.low_prices,
            &self.close_prices,
            &self.volumes
        )
        .map(|(&date, &open, &high, &low, &close, &volume)| PriceRecord {
            date,
            open,
            high,
            low,
            close,
            volume,
        })
    }

    /// Index range of the first `n` rows.
    pub fn head(&self, n: usize) -> Range<usize> {
        0..n.min(self.len())
    }

    /// Index range of the last `n` rows.
    pub fn tail(&self, n: usize) -> Range<usize> {
        self.len().saturating_sub(n)..self.len()
    }
}
