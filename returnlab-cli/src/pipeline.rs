//! The fixed pipeline: fetch → fill → plot → daily → plot → cumulative → plot.

use anyhow::{Context, Result};
use returnlab_core::data::{date_range, fetch_price_table, PriceProvider};
use returnlab_core::export::write_csv;
use returnlab_core::transform::{cumulative_returns, daily_returns, forward_fill};
use returnlab_core::{PriceTable, ScenarioConfig};
use returnlab_tui::{PlotOptions, Plotter};
use std::path::{Path, PathBuf};
use tracing::info;

/// Every table the pipeline produced, in the order they were built.
#[derive(Debug)]
pub struct PipelineOutput {
    /// Symbols after the reference symbol was ensured.
    pub symbols: Vec<String>,
    pub prices: PriceTable,
    pub filled: PriceTable,
    pub daily: PriceTable,
    pub cumulative: PriceTable,
}

pub fn run_pipeline(
    provider: &dyn PriceProvider,
    plotter: &mut dyn Plotter,
    scenario: &ScenarioConfig,
) -> Result<PipelineOutput> {
    let dates = date_range(scenario.start, scenario.end)?;
    let mut symbols = scenario.symbols.clone();

    let prices = fetch_price_table(provider, &mut symbols, &dates, &scenario.reference_symbol)
        .with_context(|| format!("fetching prices from {}", provider.name()))?;
    info!(
        rows = prices.len(),
        columns = prices.columns().len(),
        "price table ready"
    );

    let filled = forward_fill(&prices);
    plotter
        .plot(&filled, &PlotOptions::titled(&scenario.charts.prices_title))
        .context("plotting prices")?;

    let daily = daily_returns(&filled);
    plotter
        .plot(
            &daily,
            &PlotOptions::titled(&scenario.charts.daily_title).with_ylabel("Daily Returns"),
        )
        .context("plotting daily returns")?;

    let cumulative = cumulative_returns(&daily);
    plotter
        .plot(
            &cumulative,
            &PlotOptions::titled(&scenario.charts.cumulative_title)
                .with_ylabel("Cumulative Returns"),
        )
        .context("plotting cumulative returns")?;

    Ok(PipelineOutput {
        symbols,
        prices,
        filled,
        daily,
        cumulative,
    })
}

/// Write the charted tables as CSV into `dir`, creating it if needed.
pub fn export_tables(output: &PipelineOutput, dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating export directory {}", dir.display()))?;

    let mut written = Vec::with_capacity(3);
    for (name, table) in [
        ("prices.csv", &output.filled),
        ("daily_returns.csv", &output.daily),
        ("cumulative_returns.csv", &output.cumulative),
    ] {
        let path = dir.join(name);
        write_csv(table, &path).with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), "exported");
        written.push(path);
    }
    Ok(written)
}
