pub mod a001_sales_book;
pub mod a002_order_book;
pub mod a003_item_master;
pub mod common;

use serde::{Deserialize, Serialize};

pub use a001_sales_book::SalesRecord;
pub use a002_order_book::OrderRecord;
pub use a003_item_master::ItemMasterRecord;

/// The three source collections a dashboard pass reads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ledgers {
    pub sales: Vec<SalesRecord>,
    pub orders: Vec<OrderRecord>,
    #[serde(default)]
    pub item_master: Vec<ItemMasterRecord>,
}
