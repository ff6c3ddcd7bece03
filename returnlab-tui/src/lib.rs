//! ReturnLab TUI — terminal line charts for date-indexed tables.
//!
//! - `LineChart`: ratatui widget, one line per column
//! - `TerminalPlotter`: full-screen viewer that blocks until dismissed
//! - `SummaryPlotter`: headless text summary for non-interactive runs

pub mod chart;
pub mod plotter;
pub mod theme;
pub mod viewer;

pub use chart::LineChart;
pub use plotter::{PlotError, PlotOptions, Plotter, SummaryPlotter};
pub use theme::Theme;
pub use viewer::{install_panic_hook, TerminalPlotter};
