pub mod aggregate;

pub use aggregate::OrderRecord;
