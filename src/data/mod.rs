mod bn_kline;
mod csv_export;
mod loader;
pub(crate) mod provider;
mod rate_limiter;

pub use {
    csv_export::{CSV_HEADERS, CsvExporter, decode_csv, encode_csv},
    loader::DataLoader,
    provider::{BinanceProvider, DemoProvider, MarketDataProvider},
};

pub(crate) use {bn_kline::load_klines, rate_limiter::GlobalRateLimiter};
