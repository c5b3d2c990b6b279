use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use std::{fs::File, io::BufWriter, path::PathBuf};
use tabled::{Table, Tabled, settings::Style};

use coin_forecast::config::HorizonYears;
use coin_forecast::models::{ForecastRow, PriceRecord};
use coin_forecast::utils::{format_date, today_local};
use coin_forecast::{
    AdditiveForecaster, BinanceProvider, CsvExporter, DashboardInputs, DataLoader, DemoProvider,
    MarketDataProvider, Symbol, run_pipeline,
};

/// Runs the dashboard pipeline once and prints the results as tables.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct ReportArgs {
    #[arg(long, default_value = "BTC-USD")]
    symbol: Symbol,

    #[arg(long, default_value = "2018-01-01")]
    start: NaiveDate,

    /// Forecast horizon in years
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=4))]
    years: u32,

    /// Use the offline synthetic price source
    #[arg(long, default_value_t = false)]
    demo: bool,

    /// Write `<symbol>.csv` into this directory
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Dump the forecast rows as JSON to this file
    #[arg(long)]
    json: Option<PathBuf>,

    /// Rows shown in each table
    #[arg(long, default_value_t = 5)]
    rows: usize,
}

#[derive(Tabled)]
struct PriceTableRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Open")]
    open: String,
    #[tabled(rename = "High")]
    high: String,
    #[tabled(rename = "Low")]
    low: String,
    #[tabled(rename = "Close")]
    close: String,
    #[tabled(rename = "Volume")]
    volume: String,
}

impl From<PriceRecord> for PriceTableRow {
    fn from(r: PriceRecord) -> Self {
        Self {
            date: format_date(r.date),
            open: r.open.to_string(),
            high: r.high.to_string(),
            low: r.low.to_string(),
            close: r.close.to_string(),
            volume: r.volume.to_string(),
        }
    }
}

#[derive(Tabled)]
struct ForecastTableRow {
    ds: String,
    trend: String,
    yhat_lower: String,
    yhat_upper: String,
    yhat: String,
}

impl From<&ForecastRow> for ForecastTableRow {
    fn from(r: &ForecastRow) -> Self {
        Self {
            ds: format_date(r.ds),
            trend: format!("{:.2}", r.trend),
            yhat_lower: format!("{:.2}", r.yhat_lower),
            yhat_upper: format!("{:.2}", r.yhat_upper),
            yhat: format!("{:.2}", r.yhat),
        }
    }
}

fn print_table<T: Tabled>(title: &str, rows: Vec<T>) {
    println!("\n{}", title);
    println!("{}", Table::new(rows).with(Style::rounded()));
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = ReportArgs::parse();
    let provider: Box<dyn MarketDataProvider> = if args.demo {
        Box::new(DemoProvider)
    } else {
        Box::new(BinanceProvider::new())
    };
    log::info!("Market data source: {}", provider.name());

    let loader = DataLoader::new(provider);
    let inputs = DashboardInputs {
        symbol: args.symbol,
        start: args.start,
        horizon: HorizonYears::new(args.years),
    };
    let run = run_pipeline(&loader, &AdditiveForecaster::default(), &inputs, today_local())
        .await
        .with_context(|| format!("Report failed for {}", args.symbol))?;

    let series = &run.series;
    print_table(
        &format!("{} first rows", run.key),
        series.head(args.rows).map(|i| PriceTableRow::from(series.record(i))).collect(),
    );
    print_table(
        &format!("{} last rows", run.key),
        series.tail(args.rows).map(|i| PriceTableRow::from(series.record(i))).collect(),
    );

    let future = run.forecast.future();
    let from = future.len().saturating_sub(args.rows);
    print_table(
        &format!("Forecast for {} (last {} of {} future rows)", inputs.horizon, future.len() - from, future.len()),
        future[from..].iter().map(ForecastTableRow::from).collect(),
    );

    if let Some(dir) = &args.csv {
        let path = CsvExporter::default().save(dir, &run.key, series)?;
        println!("\nCSV written to {}", path.display());
    }

    if let Some(path) = &args.json {
        let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &run.forecast)
            .context("Failed to serialize forecast")?;
        println!("Forecast JSON written to {}", path.display());
    }

    Ok(())
}
