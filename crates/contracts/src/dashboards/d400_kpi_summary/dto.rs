use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Time inputs of a reporting pass. Calculators never read the wall clock;
/// the caller nearest the system boundary fills this in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportClock {
    /// Invoices due on or before this date count as outstanding
    pub reference_date: NaiveDate,
    /// Month key ("YYYY-MM") used for current-month figures
    pub current_month: String,
}

/// Invoice count and outstanding receivables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialOverview {
    /// Distinct invoice numbers
    pub total_invoice_count: usize,
    pub outstanding_amount_lakh: f64,
}

/// Headline KPI cards. Monetary figures are in lakh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiBundle {
    pub ytd_sales: f64,
    pub avg_monthly_sale: f64,
    pub unique_pos: usize,
    /// Month the `current_month_sales` figure refers to
    pub current_month: String,
    pub current_month_sales: f64,
    pub total_sku: usize,
    /// Complete value / total value, in percent
    pub completion_rate: f64,
    pub total_po_value: f64,
    pub complete_value: f64,
}

/// Three-bar comparison of total, complete and pending order value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionChartData {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

/// KPI figures recomputed over a single month of both ledgers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySnapshot {
    pub month: String,
    pub kpi: KpiBundle,
    pub pending_dispatch_lakh: f64,
    pub financial: FinancialOverview,
}

/// Everything the KPI card row displays
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSummary {
    pub financial: FinancialOverview,
    pub pending_dispatch_lakh: f64,
    pub kpi: KpiBundle,
    pub completion_chart: CompletionChartData,
    /// Distinct item codes in the item master
    pub item_master_count: usize,
}
