use serde::{Deserialize, Serialize};

use crate::domain::OrderRecord;

/// Dispatch totals of one SKU
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkuSummaryRow {
    pub sku: String,
    pub dispatch_qty: f64,
    /// Distinct PO numbers touching this SKU
    pub po_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopSkuRow {
    pub sku: String,
    /// Brand of the first order line seen for this SKU
    pub brand: Option<String>,
    pub total_order: f64,
    pub total_dispatch: f64,
    pub po_count: usize,
}

/// Top-N SKUs by dispatched quantity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopSkus {
    pub top: Vec<TopSkuRow>,
    /// Dispatched quantity across every SKU, not only the top rows
    pub total_dispatch_qty: f64,
}

impl TopSkus {
    /// Share of the grand total, in percent (0 when nothing was dispatched)
    pub fn share_percent(&self, row: &TopSkuRow) -> f64 {
        if self.total_dispatch_qty == 0.0 {
            0.0
        } else {
            row.total_dispatch / self.total_dispatch_qty * 100.0
        }
    }
}

/// Dispatch activity of all SKUs per month, months ascending
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlyDispatchSeries {
    pub months: Vec<String>,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub po_counts: Vec<f64>,
}

/// Dispatch of a single SKU per month, months ascending
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkuMonthlyDispatch {
    pub sku: String,
    pub months: Vec<String>,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

/// A month ranked by dispatched quantity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthRank {
    pub rank: usize,
    pub month: String,
    pub label: String,
    pub dispatch_qty: f64,
    pub po_count: Option<f64>,
}

/// Two SKUs on a shared month axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkuComparison {
    pub sku_a: String,
    pub sku_b: String,
    pub months: Vec<String>,
    pub labels: Vec<String>,
    pub a_values: Vec<f64>,
    pub b_values: Vec<f64>,
}

/// SKU table row with its order lines for drill-down
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkuListRow {
    pub sku: String,
    /// Order lines, not distinct POs
    pub po_count: usize,
    pub order_qty: f64,
    pub dispatch_qty: f64,
    /// Undispatched quantity of lines still marked incomplete
    pub pending_qty: f64,
    pub value: f64,
    pub rows: Vec<OrderRecord>,
}
