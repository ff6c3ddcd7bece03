//! ReturnLab CLI — fetch prices, fill gaps, chart daily and cumulative returns.
//!
//! With no arguments, runs the demonstration scenario: SPY and XOM over July
//! 2012, three charts in sequence (filled prices, daily returns, cumulative
//! returns). Each chart stays on screen until dismissed.

mod pipeline;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use returnlab_core::data::{CsvProvider, PriceProvider, YahooProvider};
use returnlab_core::ScenarioConfig;
use returnlab_tui::{install_panic_hook, SummaryPlotter, TerminalPlotter};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::pipeline::{export_tables, run_pipeline};

#[derive(Parser, Debug)]
#[command(
    name = "returnlab",
    about = "ReturnLab: daily and cumulative returns from adjusted closes"
)]
struct Cli {
    /// Symbols to chart, comma separated (the reference symbol is added if absent).
    #[arg(long, value_delimiter = ',')]
    symbols: Option<Vec<String>>,

    /// Start date (YYYY-MM-DD). Defaults to 2012-07-01.
    #[arg(long)]
    start: Option<String>,

    /// End date (YYYY-MM-DD), inclusive. Defaults to 2012-07-31.
    ///
    /// Prices on the end date itself are fetched. Tools that treat `end` as
    /// exclusive (yfinance, for one) stop a day earlier for the same range.
    #[arg(long)]
    end: Option<String>,

    /// Symbol whose trading days define the calendar. Defaults to SPY.
    #[arg(long)]
    reference: Option<String>,

    /// Scenario TOML file; the flags above override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Read `<SYMBOL>.csv` files from this directory instead of Yahoo Finance.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Also write the charted tables as CSV into this directory.
    #[arg(long)]
    export_dir: Option<PathBuf>,

    /// Print a text summary of each chart instead of opening the viewer.
    #[arg(long, default_value_t = false)]
    headless: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let scenario = build_scenario(&cli)?;

    let provider: Box<dyn PriceProvider> = match &cli.data_dir {
        Some(dir) => Box::new(CsvProvider::new(dir)),
        None => Box::new(YahooProvider::new()?),
    };

    let output = if cli.headless {
        let mut plotter = SummaryPlotter::new(std::io::stdout());
        run_pipeline(provider.as_ref(), &mut plotter, &scenario)?
    } else {
        install_panic_hook();
        let mut plotter = TerminalPlotter::default();
        run_pipeline(provider.as_ref(), &mut plotter, &scenario)?
    };

    if let Some(dir) = &cli.export_dir {
        export_tables(&output, dir)?;
    }

    Ok(())
}

/// Start from the config file (or the demo scenario) and apply CLI overrides.
fn build_scenario(cli: &Cli) -> Result<ScenarioConfig> {
    let mut scenario = match &cli.config {
        Some(path) => ScenarioConfig::from_file(path)?,
        None => ScenarioConfig::default(),
    };

    if let Some(symbols) = &cli.symbols {
        scenario.symbols = symbols.iter().map(|s| s.trim().to_uppercase()).collect();
    }
    if let Some(start) = &cli.start {
        scenario.start = parse_date(start).context("--start")?;
    }
    if let Some(end) = &cli.end {
        scenario.end = parse_date(end).context("--end")?;
    }
    if let Some(reference) = &cli.reference {
        scenario.reference_symbol = reference.trim().to_uppercase();
    }

    scenario.validate()?;
    Ok(scenario)
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("invalid date '{s}', expected YYYY-MM-DD"))
}
