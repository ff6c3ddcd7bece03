//! Offline price provider backed by per-symbol CSV files.
//!
//! Layout: `<dir>/<SYMBOL>.csv` with at least a `Date` column (`YYYY-MM-DD`)
//! and an `Adj Close` column. An empty, `null` or non-finite `Adj Close` cell
//! means the symbol did not trade that day.

use super::provider::{DataError, PriceProvider, PriceSeries};
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Adj Close")]
    adj_close: Option<String>,
}

const ADJ_CLOSE: &str = "Adj Close";

/// Parse an `Adj Close` cell; blank, `null` and non-finite values are missing.
fn parse_price(raw: Option<&str>) -> Result<Option<f64>, String> {
    let raw = match raw.map(str::trim) {
        None => return Ok(None),
        Some(s) if s.is_empty() || s.eq_ignore_ascii_case("null") => return Ok(None),
        Some(s) => s,
    };
    let price: f64 = raw
        .parse()
        .map_err(|e| format!("bad {ADJ_CLOSE} '{raw}': {e}"))?;
    Ok(price.is_finite().then_some(price))
}

pub struct CsvProvider {
    dir: PathBuf,
}

impl CsvProvider {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn symbol_path(&self, symbol: &str) -> PathBuf {
        self.dir.join(format!("{symbol}.csv"))
    }
}

impl PriceProvider for CsvProvider {
    fn name(&self) -> &str {
        "csv_import"
    }

    fn fetch_adjusted_close(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, DataError> {
        let path = self.symbol_path(symbol);
        if !path.is_file() {
            return Err(DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            });
        }

        let csv_err = |message: String| DataError::Csv {
            path: path.display().to_string(),
            message,
        };

        let mut reader = csv::Reader::from_path(&path).map_err(|e| csv_err(e.to_string()))?;
        let headers = reader.headers().map_err(|e| csv_err(e.to_string()))?;
        if !headers.iter().any(|h| h == ADJ_CLOSE) {
            return Err(csv_err(format!("missing '{ADJ_CLOSE}' column")));
        }

        let mut points = Vec::new();

        for row in reader.deserialize::<CsvRow>() {
            let row = row.map_err(|e| csv_err(e.to_string()))?;
            let date = NaiveDate::parse_from_str(row.date.trim(), "%Y-%m-%d")
                .map_err(|e| csv_err(format!("bad date '{}': {e}", row.date)))?;
            if date < start || date > end {
                continue;
            }
            if let Some(price) = parse_price(row.adj_close.as_deref()).map_err(csv_err)? {
                points.push((date, price));
            }
        }

        if points.is_empty() {
            return Err(DataError::EmptyResponse {
                symbol: symbol.to_string(),
            });
        }

        Ok(PriceSeries::new(symbol, points))
    }
}
