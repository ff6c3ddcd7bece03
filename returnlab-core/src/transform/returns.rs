//! Daily and cumulative returns.
//!
//! daily[t]      = price[t] / price[t-1] - 1, with daily[0] = 0
//! cumulative[t] = (1 + daily[0]) * ... * (1 + daily[t]) - 1
//!
//! A daily cell is missing when either price is missing, the prior price is
//! zero, or the quotient is not finite. Row 0 is 0.0 regardless. A missing
//! daily cell leaves the cumulative cell missing, and the running product
//! carries over it unchanged.

use crate::table::PriceTable;

pub fn daily_returns(prices: &PriceTable) -> PriceTable {
    prices.map_columns(daily_return_values)
}

pub fn cumulative_returns(daily: &PriceTable) -> PriceTable {
    daily.map_columns(cumulative_return_values)
}

/// Prices implied by a cumulative return table: `base * (1 + cumulative)`.
///
/// `base` holds one value per column, in column order (usually the first
/// row of the filled price table).
pub fn rebase(cumulative: &PriceTable, base: &[Option<f64>]) -> PriceTable {
    let mut column = 0;
    cumulative.map_columns(|values| {
        let b = base.get(column).copied().flatten();
        column += 1;
        values
            .iter()
            .map(|c| match (b, c) {
                (Some(b), Some(c)) => Some(b * (1.0 + c)),
                _ => None,
            })
            .collect()
    })
}

pub fn daily_return_values(prices: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut result = Vec::with_capacity(prices.len());
    for (i, curr) in prices.iter().enumerate() {
        if i == 0 {
            result.push(Some(0.0));
            continue;
        }
        let change = match (prices[i - 1], *curr) {
            (Some(prev), Some(curr)) if prev != 0.0 => {
                let r = curr / prev - 1.0;
                r.is_finite().then_some(r)
            }
            _ => None,
        };
        result.push(change);
    }
    result
}

pub fn cumulative_return_values(daily: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut growth = 1.0;
    daily
        .iter()
        .map(|r| {
            r.map(|r| {
                growth *= 1.0 + r;
                growth - 1.0
            })
        })
        .collect()
}
