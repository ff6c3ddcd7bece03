//! Property tests for table transform invariants.
//!
//! Uses proptest to verify:
//! 1. Forward fill leaves only a leading missing run and is idempotent
//! 2. Daily returns are exactly zero on the first row
//! 3. Daily returns equal price[t] / price[t-1] - 1
//! 4. Rebasing cumulative returns on the first price reproduces the prices
//! 5. Dropping reference-missing rows leaves no missing reference cell

use chrono::NaiveDate;
use proptest::prelude::*;
use returnlab_core::transform::{cumulative_returns, daily_returns, forward_fill, rebase};
use returnlab_core::{Column, PriceTable};

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_price() -> impl Strategy<Value = f64> {
    (1.0..500.0_f64).prop_map(|p| (p * 100.0).round() / 100.0)
}

fn arb_cell() -> impl Strategy<Value = Option<f64>> {
    prop::option::weighted(0.7, arb_price())
}

/// A table of 1..4 columns with 1..40 rows and random gaps.
fn arb_table() -> impl Strategy<Value = PriceTable> {
    (1usize..40, 1usize..4).prop_flat_map(|(rows, cols)| {
        prop::collection::vec(prop::collection::vec(arb_cell(), rows), cols)
            .prop_map(move |columns| build_table(rows, columns))
    })
}

/// A fully populated table (no gaps).
fn arb_dense_table() -> impl Strategy<Value = PriceTable> {
    (1usize..40, 1usize..4).prop_flat_map(|(rows, cols)| {
        prop::collection::vec(prop::collection::vec(arb_price().prop_map(Some), rows), cols)
            .prop_map(move |columns| build_table(rows, columns))
    })
}

fn build_table(rows: usize, columns: Vec<Vec<Option<f64>>>) -> PriceTable {
    let start = NaiveDate::from_ymd_opt(2012, 7, 2).unwrap();
    let dates = start.iter_days().take(rows).collect();
    let columns = columns
        .into_iter()
        .enumerate()
        .map(|(i, values)| Column::new(format!("S{i}"), values))
        .collect();
    PriceTable::new(dates, columns).unwrap()
}

// ── 1. Forward fill ──────────────────────────────────────────────────

proptest! {
    /// After forward fill, a missing cell can only sit in a column's leading run.
    #[test]
    fn forward_fill_leaves_only_leading_gaps(table in arb_table()) {
        let filled = forward_fill(&table);
        for column in filled.columns() {
            let first_present = column.values.iter().position(Option::is_some);
            match first_present {
                Some(first) => {
                    prop_assert!(column.values[..first].iter().all(Option::is_none));
                    prop_assert!(column.values[first..].iter().all(Option::is_some));
                }
                None => prop_assert!(column.values.iter().all(Option::is_none)),
            }
        }
    }

    /// Present cells are never altered; filled cells copy the latest prior observation.
    #[test]
    fn forward_fill_copies_last_observation(table in arb_table()) {
        let filled = forward_fill(&table);
        for (orig, out) in table.columns().iter().zip(filled.columns()) {
            let mut last = None;
            for (o, f) in orig.values.iter().zip(&out.values) {
                if o.is_some() {
                    last = *o;
                    prop_assert_eq!(f, o);
                } else {
                    prop_assert_eq!(*f, last);
                }
            }
        }
    }

    #[test]
    fn forward_fill_is_idempotent(table in arb_table()) {
        let once = forward_fill(&table);
        let twice = forward_fill(&once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn transforms_preserve_shape(table in arb_table()) {
        let daily = daily_returns(&forward_fill(&table));
        let cumulative = cumulative_returns(&daily);
        for t in [&daily, &cumulative] {
            prop_assert_eq!(t.dates(), table.dates());
            prop_assert_eq!(t.symbols(), table.symbols());
        }
    }
}

// ── 2–3. Daily returns ───────────────────────────────────────────────

proptest! {
    #[test]
    fn daily_first_row_is_zero(table in arb_table()) {
        let daily = daily_returns(&table);
        prop_assert!(daily.row(0).iter().all(|v| *v == Some(0.0)));
    }

    #[test]
    fn daily_is_price_ratio_minus_one(table in arb_dense_table()) {
        let daily = daily_returns(&table);
        for symbol in table.symbols() {
            for t in 1..table.len() {
                let prev = table.value(t - 1, symbol).unwrap();
                let curr = table.value(t, symbol).unwrap();
                let r = daily.value(t, symbol).unwrap();
                prop_assert!((r - (curr / prev - 1.0)).abs() < 1e-12);
            }
        }
    }
}

// ── 4. Round trip ────────────────────────────────────────────────────

proptest! {
    #[test]
    fn rebased_cumulative_reproduces_prices(table in arb_dense_table()) {
        let cumulative = cumulative_returns(&daily_returns(&table));
        let rebuilt = rebase(&cumulative, &table.row(0));
        for symbol in table.symbols() {
            for t in 0..table.len() {
                let expected = table.value(t, symbol).unwrap();
                let actual = rebuilt.value(t, symbol).unwrap();
                prop_assert!(
                    (expected - actual).abs() <= expected.abs() * 1e-9,
                    "{} row {}: {} vs {}", symbol, t, expected, actual
                );
            }
        }
    }

    #[test]
    fn cumulative_first_row_is_zero(table in arb_dense_table()) {
        let cumulative = cumulative_returns(&daily_returns(&table));
        prop_assert!(cumulative.row(0).iter().all(|v| *v == Some(0.0)));
    }
}

// ── 5. Calendar alignment ────────────────────────────────────────────

proptest! {
    #[test]
    fn dropping_reference_gaps_keeps_other_columns_aligned(table in arb_table()) {
        let mut aligned = table.clone();
        let dropped = aligned.drop_rows_missing("S0").unwrap();

        let reference = table.column("S0").unwrap();
        prop_assert_eq!(dropped, reference.values.len() - reference.observed());
        prop_assert!(aligned.column("S0").unwrap().values.iter().all(Option::is_some));

        // Surviving rows keep their original values in every column
        let kept: Vec<usize> = (0..table.len())
            .filter(|&i| reference.values[i].is_some())
            .collect();
        for (new_row, &old_row) in kept.iter().enumerate() {
            prop_assert_eq!(aligned.dates()[new_row], table.dates()[old_row]);
            prop_assert_eq!(aligned.row(new_row), table.row(old_row));
        }
    }
}
