//! ReturnLab Core — price tables, data providers, gap filling, returns.
//!
//! The pipeline this crate supports:
//! - Fetch adjusted closes per symbol (Yahoo Finance or CSV files)
//! - Align them to the reference symbol's trading calendar
//! - Forward fill the remaining gaps
//! - Derive daily and cumulative returns
//!
//! Charting lives in `returnlab-tui`; the driver in `returnlab-cli`.

pub mod config;
pub mod data;
pub mod export;
pub mod table;
pub mod transform;

pub use config::{ChartTitles, ScenarioConfig};
pub use table::{Column, PriceTable, TableError};
