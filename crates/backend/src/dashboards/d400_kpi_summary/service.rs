use chrono::NaiveDate;
use contracts::dashboards::d400_kpi_summary::{
    CompletionChartData, FinancialOverview, KpiBundle, KpiSummary, MonthlySnapshot, ReportClock,
};
use contracts::domain::{ItemMasterRecord, OrderRecord, SalesRecord};
use std::collections::HashSet;

use crate::shared::normalize::{
    distinct_count, is_complete, is_incomplete, is_truthy, month_key, or_zero, parse_date,
    sum_by, to_lakh,
};

/// Default outstanding-invoice cutoff, "YYYY-MM-DD"
pub const DEFAULT_REFERENCE_DATE: &str = "2025-12-20";

/// Distinct invoices and the receivable amount due on or before
/// `reference_date` (inclusive). Records without a parseable due date are
/// never outstanding.
pub fn calculate_financial_overview(
    sales: &[SalesRecord],
    reference_date: NaiveDate,
) -> FinancialOverview {
    let total_invoice_count = distinct_count(sales.iter().map(|s| s.invoice_no.as_str()));

    let outstanding: f64 = sales
        .iter()
        .filter(|s| parse_date(&s.due_date).is_some_and(|due| due <= reference_date))
        .map(|s| or_zero(s.value))
        .sum();

    FinancialOverview {
        total_invoice_count,
        outstanding_amount_lakh: to_lakh(outstanding),
    }
}

/// Full value of order lines whose status is exactly "incomplete".
///
/// This is a value proxy for what is left to ship, not
/// `order_qty - disp_qty`. Other statuses (blank, "cancelled") are ignored.
pub fn calculate_pending_dispatch(orders: &[OrderRecord]) -> f64 {
    let remaining: f64 = orders
        .iter()
        .filter(|o| is_incomplete(&o.status) && is_truthy(o.value))
        .map(|o| or_zero(o.value))
        .sum();

    to_lakh(remaining)
}

/// Headline KPI bundle.
///
/// `current_month` is a month key supplied by the caller; this function does
/// not look at the clock.
pub fn calculate_kpis(
    orders: &[OrderRecord],
    sales: &[SalesRecord],
    current_month: &str,
) -> KpiBundle {
    let ytd_sales = to_lakh(sum_by(sales, |s| s.value));

    let active_months: HashSet<&str> = sales
        .iter()
        .map(|s| month_key(&s.date))
        .filter(|m| !m.is_empty())
        .collect();
    let avg_monthly_sale = ytd_sales / active_months.len().max(1) as f64;

    let unique_pos = distinct_count(orders.iter().map(|o| o.po_number.as_str()));
    let total_sku = distinct_count(orders.iter().map(|o| o.sku.as_str()));

    let current_month_sales: f64 = sales
        .iter()
        .filter(|s| !current_month.is_empty() && month_key(&s.date) == current_month)
        .map(|s| or_zero(s.value))
        .sum();

    let total_po_value = sum_by(orders, |o| o.value);
    let complete_value: f64 = orders
        .iter()
        .filter(|o| is_complete(&o.status))
        .map(|o| or_zero(o.value))
        .sum();
    let completion_rate = if total_po_value != 0.0 {
        complete_value / total_po_value * 100.0
    } else {
        0.0
    };

    KpiBundle {
        ytd_sales,
        avg_monthly_sale,
        unique_pos,
        current_month: current_month.to_string(),
        current_month_sales: to_lakh(current_month_sales),
        total_sku,
        completion_rate,
        total_po_value: to_lakh(total_po_value),
        complete_value: to_lakh(complete_value),
    }
}

/// Total, complete and pending order value side by side (lakh)
pub fn prepare_completion_chart_data(
    kpi: &KpiBundle,
    pending_dispatch_lakh: f64,
) -> CompletionChartData {
    CompletionChartData {
        labels: vec![
            "Total PO Value".to_string(),
            "Complete Value".to_string(),
            "Pending Value".to_string(),
        ],
        values: vec![kpi.total_po_value, kpi.complete_value, pending_dispatch_lakh],
    }
}

/// Distinct non-empty item codes
pub fn count_item_codes(items: &[ItemMasterRecord]) -> usize {
    distinct_count(items.iter().map(|i| i.item_code.as_str()))
}

/// Recomputes the KPI cards over the lines of one month of both ledgers.
/// Undated lines belong to no month, so an empty `month` selects nothing.
pub fn monthly_snapshot(
    orders: &[OrderRecord],
    sales: &[SalesRecord],
    month: &str,
    clock: &ReportClock,
) -> MonthlySnapshot {
    let month_sales: Vec<SalesRecord> = sales
        .iter()
        .filter(|s| !s.date.is_empty() && month_key(&s.date) == month)
        .cloned()
        .collect();
    let month_orders: Vec<OrderRecord> = orders
        .iter()
        .filter(|o| !o.date.is_empty() && month_key(&o.date) == month)
        .cloned()
        .collect();

    MonthlySnapshot {
        month: month.to_string(),
        kpi: calculate_kpis(&month_orders, &month_sales, &clock.current_month),
        pending_dispatch_lakh: calculate_pending_dispatch(&month_orders),
        financial: calculate_financial_overview(&month_sales, clock.reference_date),
    }
}

/// Everything the KPI card row needs in one call
pub fn get_kpi_summary(
    orders: &[OrderRecord],
    sales: &[SalesRecord],
    items: &[ItemMasterRecord],
    clock: &ReportClock,
) -> KpiSummary {
    let financial = calculate_financial_overview(sales, clock.reference_date);
    let pending_dispatch_lakh = calculate_pending_dispatch(orders);
    let kpi = calculate_kpis(orders, sales, &clock.current_month);
    let completion_chart = prepare_completion_chart_data(&kpi, pending_dispatch_lakh);

    KpiSummary {
        financial,
        pending_dispatch_lakh,
        kpi,
        completion_chart,
        item_master_count: count_item_codes(items),
    }
}
