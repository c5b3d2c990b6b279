//! Configuration module for the forecast dashboard.

// Can all be private now because we have a public re-export.
mod binance;
mod dashboard;
mod debug;
mod forecast;
mod plot;
mod types;

// Re-export commonly used items
pub use binance::{BINANCE, BinanceApiConfig};
pub use dashboard::DASHBOARD;
pub use debug::DF;
pub use forecast::{FORECAST, ForecastConfig, SeasonalityConfig};
pub use plot::PLOT_CONFIG;
pub use types::{BaseVol, ClosePrice, HighPrice, HorizonYears, LowPrice, OpenPrice, PriceLike};
