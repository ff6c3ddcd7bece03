//! Fetch orchestrator: one provider call per symbol, joined into a price table.

use super::provider::{DataError, PriceProvider};
use crate::table::PriceTable;
use chrono::NaiveDate;
use tracing::{info, warn};

/// Symbol whose trading calendar defines valid dates unless configured otherwise.
pub const DEFAULT_REFERENCE: &str = "SPY";

/// Insert `reference` at the front of `symbols` if it is not already listed.
///
/// Returns true if the list was changed.
pub fn ensure_reference(symbols: &mut Vec<String>, reference: &str) -> bool {
    if symbols.iter().any(|s| s == reference) {
        return false;
    }
    symbols.insert(0, reference.to_string());
    true
}

/// Build the price table for `symbols` over the candidate `dates`.
///
/// Symbols are fetched sequentially in list order and left-joined onto
/// `dates`. Right after the reference column is joined, every row where it
/// is missing is dropped; columns joined later only see the remaining
/// trading days. The first provider error aborts the whole fetch.
pub fn fetch_price_table(
    provider: &dyn PriceProvider,
    symbols: &mut Vec<String>,
    dates: &[NaiveDate],
    reference: &str,
) -> Result<PriceTable, DataError> {
    let (start, end) = match (dates.first(), dates.last()) {
        (Some(&start), Some(&end)) => (start, end),
        _ => return Err(DataError::InvalidRange("no candidate dates".into())),
    };

    if ensure_reference(symbols, reference) {
        info!(reference, "added reference symbol");
    }

    let mut table = PriceTable::with_index(dates.to_vec())?;
    let total = symbols.len();

    for (i, symbol) in symbols.iter().enumerate() {
        let series = provider.fetch_adjusted_close(symbol, start, end)?;
        info!(
            provider = provider.name(),
            symbol = symbol.as_str(),
            rows = series.len(),
            "[{}/{}] fetched",
            i + 1,
            total
        );
        table.join_series(symbol, &series.points)?;

        if symbol == reference {
            let dropped = table.drop_rows_missing(reference)?;
            info!(reference, dropped, remaining = table.len(), "aligned to reference calendar");
        }
    }

    if table.is_empty() {
        return Err(DataError::EmptyCalendar {
            reference: reference.to_string(),
            start,
            end,
        });
    }

    for column in table.columns() {
        if column.observed() == 0 {
            warn!(symbol = column.symbol.as_str(), "no prices on any reference trading day");
        }
    }

    Ok(table)
}
