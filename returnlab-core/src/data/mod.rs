//! Price retrieval and calendar alignment

pub mod calendar;
pub mod csv_import;
pub mod fetch;
pub mod provider;
pub mod yahoo;

pub use calendar::date_range;
pub use csv_import::CsvProvider;
pub use fetch::{ensure_reference, fetch_price_table, DEFAULT_REFERENCE};
pub use provider::{DataError, PriceProvider, PriceSeries};
pub use yahoo::YahooProvider;
