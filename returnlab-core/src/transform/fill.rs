//! Gap filling.
//!
//! Forward fill is the pipeline default: a missing price means "no trade
//! that day", so the last traded price still stands. The other methods are
//! available for exploration.

use crate::table::PriceTable;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FillMethod {
    /// Carry the last observation forward; a leading gap stays missing.
    Forward,
    /// Carry the next observation backward; a trailing gap stays missing.
    Backward,
    /// Replace every missing cell with a constant.
    Value(f64),
    /// Replace every missing cell with the column mean of present values.
    Mean,
}

/// Forward fill every column independently.
pub fn forward_fill(table: &PriceTable) -> PriceTable {
    table.map_columns(forward_fill_values)
}

pub fn fill_missing(table: &PriceTable, method: FillMethod) -> PriceTable {
    match method {
        FillMethod::Forward => forward_fill(table),
        FillMethod::Backward => table.map_columns(backward_fill_values),
        FillMethod::Value(v) => table.map_columns(|values| {
            values.iter().map(|cell| Some(cell.unwrap_or(v))).collect()
        }),
        FillMethod::Mean => table.map_columns(mean_fill_values),
    }
}

pub fn forward_fill_values(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut last = None;
    values
        .iter()
        .map(|cell| {
            if cell.is_some() {
                last = *cell;
            }
            last
        })
        .collect()
}

pub fn backward_fill_values(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let reversed: Vec<Option<f64>> = values.iter().rev().copied().collect();
    let mut filled = forward_fill_values(&reversed);
    filled.reverse();
    filled
}

fn mean_fill_values(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let present: Vec<f64> = values.iter().flatten().copied().collect();
    if present.is_empty() {
        return values.to_vec();
    }
    let mean = present.iter().sum::<f64>() / present.len() as f64;
    values.iter().map(|cell| Some(cell.unwrap_or(mean))).collect()
}
