//! Pure table transforms: gap filling and return calculation.

pub mod fill;
pub mod returns;

pub use fill::{fill_missing, forward_fill, FillMethod};
pub use returns::{cumulative_returns, daily_returns, rebase};
