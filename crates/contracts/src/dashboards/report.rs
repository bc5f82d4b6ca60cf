use serde::{Deserialize, Serialize};

use super::d400_kpi_summary::{KpiSummary, MonthlySnapshot, ReportClock};
use super::d401_monthly_series::{PoSeries, SalesSeries};
use super::d402_sku_dispatch::{
    MonthRank, MonthlyDispatchSeries, SkuComparison, SkuListRow, SkuMonthlyDispatch,
    SkuSummaryRow, TopSkus,
};
use super::d403_order_completion::{CompletionPie, CompletionSummary};
use super::d404_drilldown::KpiDrilldowns;
use crate::shared::view_state::DashboardState;

/// Full output of one reporting pass, ready for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardReport {
    pub clock: ReportClock,
    pub kpis: KpiSummary,
    pub sales_series: SalesSeries,
    pub po_series: PoSeries,
    pub top_skus: TopSkus,
    pub sku_summary: Vec<SkuSummaryRow>,
    pub all_skus_trend: MonthlyDispatchSeries,
    pub all_skus_rank: Vec<MonthRank>,
    /// Trend of the SKU selected in the view state, if any
    pub selected_sku_trend: Option<SkuMonthlyDispatch>,
    pub completion: CompletionSummary,
    pub completion_pie: CompletionPie,
    /// SKU table for the current month
    pub sku_list: Vec<SkuListRow>,
    pub drilldowns: KpiDrilldowns,
    /// KPI cards recomputed for the month picked in the month filter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month_snapshot: Option<MonthlySnapshot>,
    /// Two requested SKUs on a shared month axis
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku_comparison: Option<SkuComparison>,
    /// View state after restoring it for this pass
    pub view: DashboardState,
}
