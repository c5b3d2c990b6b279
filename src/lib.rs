#![allow(clippy::collapsible_if)]
#![allow(clippy::type_complexity)]

// Core modules
pub mod analysis;
pub mod app;
pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod models;
pub mod ui;
pub mod utils;

// Re-export commonly used types outside of crate (for forecast_report.rs)
pub use analysis::{AdditiveForecaster, ForecastError, Forecaster};
pub use app::App;
pub use data::{BinanceProvider, CsvExporter, DataLoader, DemoProvider, MarketDataProvider};
pub use domain::{LoadKey, Symbol};
pub use engine::{DashboardInputs, DashboardRun, run_pipeline};

// CLI argument parsing
use {clap::Parser, std::path::PathBuf};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Use the offline synthetic price source instead of Binance
    #[arg(long, default_value_t = false)]
    pub demo: bool,

    /// Directory the download button writes `<symbol>.csv` into
    #[arg(long, default_value = ".")]
    pub download_dir: PathBuf,
}

/// Main application entry point - creates the GUI app
/// This is the public API for the binary to call
pub fn run_app(cc: &eframe::CreationContext<'_>, args: Cli) -> App {
    App::new(cc, args)
}
