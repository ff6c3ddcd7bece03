//! Plotter seam between the pipeline and whatever displays a table.

use returnlab_core::PriceTable;
use std::io::Write;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("terminal I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("nothing to plot for '{title}': table has no rows")]
    EmptyTable { title: String },

    #[error("chart viewer interrupted")]
    Interrupted,
}

/// Chart heading and axis captions.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotOptions {
    pub title: String,
    pub xlabel: String,
    pub ylabel: String,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            title: "Stock prices".into(),
            xlabel: "Date".into(),
            ylabel: "Price".into(),
        }
    }
}

impl PlotOptions {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_ylabel(mut self, ylabel: impl Into<String>) -> Self {
        self.ylabel = ylabel.into();
        self
    }

    pub fn with_xlabel(mut self, xlabel: impl Into<String>) -> Self {
        self.xlabel = xlabel.into();
        self
    }
}

/// Renders one line per column on a shared date axis.
///
/// `plot` returns once the chart has been shown; interactive implementations
/// block until the viewer is dismissed.
pub trait Plotter {
    fn plot(&mut self, table: &PriceTable, options: &PlotOptions) -> Result<(), PlotError>;
}

/// Headless plotter: writes a short text summary of each chart.
pub struct SummaryPlotter<W: Write> {
    out: W,
}

impl<W: Write> SummaryPlotter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Plotter for SummaryPlotter<W> {
    fn plot(&mut self, table: &PriceTable, options: &PlotOptions) -> Result<(), PlotError> {
        let (first, last) = match (table.dates().first(), table.dates().last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => {
                return Err(PlotError::EmptyTable {
                    title: options.title.clone(),
                })
            }
        };

        writeln!(
            self.out,
            "== {} ({} rows, {} .. {})",
            options.title,
            table.len(),
            first,
            last
        )?;
        writeln!(self.out, "   {} on {}", options.ylabel, last)?;

        let last_row = table.row(table.len() - 1);
        for (symbol, value) in table.symbols().into_iter().zip(last_row) {
            match value {
                Some(v) => writeln!(self.out, "   {symbol:<8} {v:>14.6}")?,
                None => writeln!(self.out, "   {symbol:<8} {:>14}", "-")?,
            }
        }
        Ok(())
    }
}
