pub mod aggregate;

pub use aggregate::ItemMasterRecord;
