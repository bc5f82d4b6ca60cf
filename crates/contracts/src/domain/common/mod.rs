//! Common helpers shared by all ledger records

pub mod lenient;

pub use lenient::{normalize_date, parse_number, to_number, value_to_number, value_to_string};
