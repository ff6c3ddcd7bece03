//! Date-indexed table of numeric columns, one per symbol.
//!
//! Every table in the pipeline (prices, filled prices, daily returns,
//! cumulative returns) has this shape. Cells are `Option<f64>`; `None`
//! means no observation for that symbol on that date.

use chrono::NaiveDate;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum TableError {
    #[error("column '{symbol}' has {values} values but the index has {dates} dates")]
    LengthMismatch {
        symbol: String,
        dates: usize,
        values: usize,
    },

    #[error("date index is not strictly ascending at position {position}")]
    UnsortedIndex { position: usize },

    #[error("column '{symbol}' already exists")]
    DuplicateColumn { symbol: String },

    #[error("unknown column '{symbol}'")]
    UnknownColumn { symbol: String },
}

/// A single symbol's values, aligned to the owning table's index.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub symbol: String,
    pub values: Vec<Option<f64>>,
}

impl Column {
    pub fn new(symbol: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            symbol: symbol.into(),
            values,
        }
    }

    /// Number of present (non-missing) cells.
    pub fn observed(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceTable {
    dates: Vec<NaiveDate>,
    columns: Vec<Column>,
}

impl PriceTable {
    /// Build a table from an index and pre-aligned columns.
    pub fn new(dates: Vec<NaiveDate>, columns: Vec<Column>) -> Result<Self, TableError> {
        check_index(&dates)?;
        let mut table = Self {
            dates,
            columns: Vec::with_capacity(columns.len()),
        };
        for column in columns {
            table.push_column(column)?;
        }
        Ok(table)
    }

    /// An empty table (no columns) over a candidate date index.
    pub fn with_index(dates: Vec<NaiveDate>) -> Result<Self, TableError> {
        Self::new(dates, Vec::new())
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn symbols(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.symbol.as_str()).collect()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn column(&self, symbol: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.symbol == symbol)
    }

    pub fn value(&self, row: usize, symbol: &str) -> Option<f64> {
        self.column(symbol)
            .and_then(|c| c.values.get(row).copied().flatten())
    }

    /// Append an already aligned column.
    pub fn push_column(&mut self, column: Column) -> Result<(), TableError> {
        if self.column(&column.symbol).is_some() {
            return Err(TableError::DuplicateColumn {
                symbol: column.symbol,
            });
        }
        if column.values.len() != self.dates.len() {
            return Err(TableError::LengthMismatch {
                symbol: column.symbol,
                dates: self.dates.len(),
                values: column.values.len(),
            });
        }
        self.columns.push(column);
        Ok(())
    }

    /// Left join a `(date, value)` series onto the current index.
    ///
    /// Dates in the index with no matching point become missing; points on
    /// dates outside the index are ignored. Non-finite values count as missing.
    pub fn join_series(
        &mut self,
        symbol: &str,
        points: &[(NaiveDate, f64)],
    ) -> Result<(), TableError> {
        let by_date: HashMap<NaiveDate, f64> = points
            .iter()
            .copied()
            .filter(|(_, value)| value.is_finite())
            .collect();
        let values = self
            .dates
            .iter()
            .map(|date| by_date.get(date).copied())
            .collect();
        self.push_column(Column::new(symbol, values))
    }

    /// Remove every row where `symbol` has no value, across all columns.
    pub fn drop_rows_missing(&mut self, symbol: &str) -> Result<usize, TableError> {
        let keep: Vec<bool> = self
            .column(symbol)
            .ok_or_else(|| TableError::UnknownColumn {
                symbol: symbol.to_string(),
            })?
            .values
            .iter()
            .map(Option::is_some)
            .collect();

        let before = self.dates.len();
        self.dates = retain_by_mask(std::mem::take(&mut self.dates), &keep);
        for column in &mut self.columns {
            column.values = retain_by_mask(std::mem::take(&mut column.values), &keep);
        }
        Ok(before - self.dates.len())
    }

    /// Shape-preserving transform applied to each column independently.
    ///
    /// # Panics
    ///
    /// Panics if `f` returns a vector whose length differs from the index.
    pub fn map_columns<F>(&self, mut f: F) -> Self
    where
        F: FnMut(&[Option<f64>]) -> Vec<Option<f64>>,
    {
        let columns = self
            .columns
            .iter()
            .map(|c| {
                let values = f(&c.values);
                assert_eq!(
                    values.len(),
                    self.dates.len(),
                    "map_columns changed the length of column {}",
                    c.symbol
                );
                Column::new(c.symbol.clone(), values)
            })
            .collect();
        Self {
            dates: self.dates.clone(),
            columns,
        }
    }

    /// Values of one row in column order.
    pub fn row(&self, row: usize) -> Vec<Option<f64>> {
        self.columns
            .iter()
            .map(|c| c.values.get(row).copied().flatten())
            .collect()
    }

    /// True if any cell in the table is missing.
    pub fn has_missing(&self) -> bool {
        self.columns
            .iter()
            .any(|c| c.values.iter().any(Option::is_none))
    }
}

fn check_index(dates: &[NaiveDate]) -> Result<(), TableError> {
    for (i, pair) in dates.windows(2).enumerate() {
        if pair[0] >= pair[1] {
            return Err(TableError::UnsortedIndex { position: i + 1 });
        }
    }
    Ok(())
}

fn retain_by_mask<T>(items: Vec<T>, keep: &[bool]) -> Vec<T> {
    items
        .into_iter()
        .zip(keep)
        .filter_map(|(item, &k)| k.then_some(item))
        .collect()
}
