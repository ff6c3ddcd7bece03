//! Candidate date index generation.

use super::provider::DataError;
use chrono::NaiveDate;

/// Every calendar day from `start` to `end`, inclusive.
///
/// Weekends and holidays are included; the reference symbol's trading
/// calendar prunes them later.
pub fn date_range(start: NaiveDate, end: NaiveDate) -> Result<Vec<NaiveDate>, DataError> {
    if start > end {
        return Err(DataError::InvalidRange(format!(
            "start {start} is after end {end}"
        )));
    }
    Ok(start.iter_days().take_while(|d| *d <= end).collect())
}
