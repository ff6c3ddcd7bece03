//! Price provider trait and structured error types.
//!
//! The PriceProvider trait abstracts over data sources (Yahoo Finance, CSV
//! files) so the fetcher can be driven by a stub in tests.

use crate::table::TableError;
use chrono::NaiveDate;
use thiserror::Error;

/// Structured error types for data operations.
///
/// Nothing in the pipeline recovers from these; they surface at the CLI.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("HTTP {status} while fetching {symbol}")]
    Http { symbol: String, status: u16 },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("provider returned no prices for {symbol}")]
    EmptyResponse { symbol: String },

    #[error("invalid date range: {0}")]
    InvalidRange(String),

    #[error("reference symbol {reference} has no trading days between {start} and {end}")]
    EmptyCalendar {
        reference: String,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error(transparent)]
    Table(#[from] TableError),

    #[error("CSV error in {path}: {message}")]
    Csv { path: String, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(String),
}

/// Adjusted-close history for one symbol, ascending by date.
///
/// Days without a usable adjusted close are absent rather than stored as
/// placeholders.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    pub symbol: String,
    pub points: Vec<(NaiveDate, f64)>,
}

impl PriceSeries {
    /// Sorts by date; a later duplicate date replaces an earlier one.
    /// Non-finite prices count as missing and are dropped.
    pub fn new(symbol: impl Into<String>, mut points: Vec<(NaiveDate, f64)>) -> Self {
        points.retain(|(_, price)| price.is_finite());
        points.reverse();
        points.sort_by_key(|(date, _)| *date);
        points.dedup_by_key(|(date, _)| *date);
        Self {
            symbol: symbol.into(),
            points,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|(d, _)| *d)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|(d, _)| *d)
    }
}

/// A source of daily adjusted-close prices.
///
/// Implementations make exactly one attempt per call; there is no retry or
/// cache layer above this trait.
pub trait PriceProvider {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch adjusted closes for `symbol` over `[start, end]` inclusive.
    fn fetch_adjusted_close(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, DataError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn series_sorts_and_keeps_last_duplicate() {
        let series = PriceSeries::new(
            "XOM",
            vec![
                (d("2012-07-03"), 86.0),
                (d("2012-07-02"), 85.0),
                (d("2012-07-03"), 86.5),
            ],
        );

        assert_eq!(
            series.points,
            vec![(d("2012-07-02"), 85.0), (d("2012-07-03"), 86.5)]
        );
        assert_eq!(series.first_date(), Some(d("2012-07-02")));
        assert_eq!(series.last_date(), Some(d("2012-07-03")));
    }

    #[test]
    fn series_drops_non_finite_prices() {
        let series = PriceSeries::new(
            "SPY",
            vec![
                (d("2012-07-02"), 100.0),
                (d("2012-07-03"), f64::NAN),
                (d("2012-07-05"), f64::INFINITY),
                (d("2012-07-06"), 102.0),
            ],
        );

        assert_eq!(
            series.points,
            vec![(d("2012-07-02"), 100.0), (d("2012-07-06"), 102.0)]
        );
    }

    #[test]
    fn errors_render_for_cli() {
        let err = DataError::SymbolNotFound {
            symbol: "NOPE".into(),
        };
        assert_eq!(err.to_string(), "symbol not found: NOPE");

        let err = DataError::EmptyCalendar {
            reference: "SPY".into(),
            start: d("2012-07-07"),
            end: d("2012-07-08"),
        };
        assert!(err.to_string().contains("SPY has no trading days"));
    }
}
