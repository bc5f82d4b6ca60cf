use serde::{Deserialize, Serialize};

use crate::dashboards::d402_sku_dispatch::SkuSummaryRow;
use crate::domain::{ItemMasterRecord, OrderRecord, SalesRecord};

/// Row-level listing behind an aggregated figure.
///
/// `columns` names the row fields (as serialized) the table should show, in
/// order. Rows carry every field so the presentation layer can add links.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drilldown<R> {
    pub title: String,
    pub columns: Vec<String>,
    pub rows: Vec<R>,
}

impl<R> Drilldown<R> {
    pub fn new(title: impl Into<String>, columns: &[&str], rows: Vec<R>) -> Self {
        Self {
            title: title.into(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Drill-downs attached to the KPI cards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiDrilldowns {
    pub outstanding_invoices: Drilldown<SalesRecord>,
    pub pending_dispatch: Drilldown<OrderRecord>,
    pub ytd_sales: Drilldown<SalesRecord>,
    pub current_month_sales: Drilldown<SalesRecord>,
    pub completion_rate: Drilldown<OrderRecord>,
    pub sku_summary: Drilldown<SkuSummaryRow>,
    pub item_master: Drilldown<ItemMasterRecord>,
}
