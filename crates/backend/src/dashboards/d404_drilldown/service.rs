use chrono::NaiveDate;
use contracts::dashboards::d402_sku_dispatch::{SkuListRow, SkuSummaryRow};
use contracts::dashboards::d403_order_completion::{CompletionStatus, CompletionSummary};
use contracts::dashboards::d404_drilldown::Drilldown;
use contracts::domain::{ItemMasterRecord, OrderRecord, SalesRecord};

use crate::dashboards::d402_sku_dispatch::service::{
    prepare_monthly_sku_summary, prepare_sku_summary,
};
use crate::shared::normalize::{is_complete, is_incomplete, month_key, month_label, parse_date};

const INVOICE_COLUMNS: [&str; 4] = ["invoiceNo", "date", "value", "link"];
const ORDER_COLUMNS: [&str; 8] = [
    "date", "poNumber", "brand", "orderQty", "dispQty", "status", "value", "link",
];
const SKU_SUMMARY_COLUMNS: [&str; 3] = ["sku", "dispatch_qty", "po_count"];

/// Invoices due on or before `reference_date`
pub fn outstanding_invoices(
    sales: &[SalesRecord],
    reference_date: NaiveDate,
) -> Drilldown<SalesRecord> {
    let rows = sales
        .iter()
        .filter(|s| parse_date(&s.due_date).is_some_and(|due| due <= reference_date))
        .cloned()
        .collect();
    Drilldown::new(
        "Outstanding Invoices",
        &["invoiceNo", "date", "dueDate", "value", "link"],
        rows,
    )
}

/// Order lines behind the pending-dispatch card (status "incomplete" only)
pub fn pending_dispatch_orders(orders: &[OrderRecord]) -> Drilldown<OrderRecord> {
    let rows = orders
        .iter()
        .filter(|o| is_incomplete(&o.status))
        .cloned()
        .collect();
    Drilldown::new(
        "Pending Dispatch Orders",
        &[
            "date", "poNumber", "jobName", "orderQty", "dispQty", "status", "value", "link",
        ],
        rows,
    )
}

pub fn ytd_sales(sales: &[SalesRecord]) -> Drilldown<SalesRecord> {
    Drilldown::new("YTD Sales", &INVOICE_COLUMNS, sales.to_vec())
}

pub fn current_month_sales(sales: &[SalesRecord], month: &str) -> Drilldown<SalesRecord> {
    let rows = sales
        .iter()
        .filter(|s| !s.date.is_empty() && month_key(&s.date) == month)
        .cloned()
        .collect();
    Drilldown::new(
        format!("Current Month Sales ({month})"),
        &INVOICE_COLUMNS,
        rows,
    )
}

/// Every order line, titled with the completed/total line count
pub fn completion_rate_orders(orders: &[OrderRecord]) -> Drilldown<OrderRecord> {
    let completed = orders.iter().filter(|o| is_complete(&o.status)).count();
    Drilldown::new(
        format!("Completion Rate ({}/{})", completed, orders.len()),
        &["date", "poNumber", "jobName", "status", "value", "link"],
        orders.to_vec(),
    )
}

pub fn sku_summary(orders: &[OrderRecord]) -> Drilldown<SkuSummaryRow> {
    Drilldown::new(
        "SKU Summary (Click SKU for Monthly Trend)",
        &SKU_SUMMARY_COLUMNS,
        prepare_sku_summary(orders),
    )
}

/// SKU summary behind one bar of the all-SKU trend
pub fn sku_summary_for_month(orders: &[OrderRecord], month: &str) -> Drilldown<SkuSummaryRow> {
    Drilldown::new(
        format!("Top SKUs - {}", month_label(month)),
        &SKU_SUMMARY_COLUMNS,
        prepare_monthly_sku_summary(orders, month),
    )
}

pub fn item_master_list(items: &[ItemMasterRecord]) -> Drilldown<ItemMasterRecord> {
    Drilldown::new(
        "Item Master List",
        &[
            "itemCode",
            "jobsName",
            "labelSize",
            "material",
            "inventory",
            "artworkId",
            "artworkFile",
        ],
        items.to_vec(),
    )
}

/// Lines of one row of the SKU table
pub fn sku_details(row: &SkuListRow) -> Drilldown<OrderRecord> {
    Drilldown::new(
        format!("SKU Details - {}", row.sku),
        &ORDER_COLUMNS,
        row.rows.clone(),
    )
}

/// Lines behind one slice of the completion pie
pub fn completion_partition(
    summary: &CompletionSummary,
    status: CompletionStatus,
) -> Drilldown<OrderRecord> {
    Drilldown::new(
        format!("Order Status - {}", status.label()),
        &ORDER_COLUMNS,
        summary.partition(status).orders.clone(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboards::d402_sku_dispatch::service::prepare_sku_list;
    use crate::dashboards::d403_order_completion::service::prepare_order_completion_status;

    fn sale(invoice: &str, date: &str, due: &str) -> SalesRecord {
        SalesRecord {
            invoice_no: invoice.into(),
            date: date.into(),
            due_date: due.into(),
            value: Some(1_000.0),
            ..Default::default()
        }
    }

    fn order(po: &str, sku: &str, status: &str) -> OrderRecord {
        OrderRecord {
            po_number: po.into(),
            sku: sku.into(),
            status: status.into(),
            date: "2025-12-01".into(),
            disp_qty: Some(1.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_outstanding_invoices() {
        let sales = vec![
            sale("INV-1", "2025-12-01", "2025-12-20"),
            sale("INV-2", "2025-12-01", "2025-12-21"),
            sale("INV-3", "2025-12-01", ""),
        ];
        let reference = NaiveDate::from_ymd_opt(2025, 12, 20).unwrap();
        let table = outstanding_invoices(&sales, reference);
        assert_eq!(table.title, "Outstanding Invoices");
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows[0].invoice_no, "INV-1");
        assert!(table.columns.contains(&"dueDate".to_string()));
    }

    #[test]
    fn test_current_month_sales() {
        let sales = vec![
            sale("INV-1", "2025-12-01", ""),
            sale("INV-2", "2025-11-01", ""),
            sale("INV-3", "", ""),
        ];
        let table = current_month_sales(&sales, "2025-12");
        assert_eq!(table.title, "Current Month Sales (2025-12)");
        assert_eq!(table.len(), 1);
        assert_eq!(ytd_sales(&sales).len(), 3);
    }

    #[test]
    fn test_order_drilldowns() {
        let orders = vec![
            order("P1", "A", "Complete"),
            order("P2", "A", "incomplete"),
            order("P3", "B", "cancelled"),
        ];

        assert_eq!(pending_dispatch_orders(&orders).len(), 1);

        let rate = completion_rate_orders(&orders);
        assert_eq!(rate.title, "Completion Rate (1/3)");
        assert_eq!(rate.len(), 3);

        let summary = prepare_order_completion_status(&orders);
        let incomplete = completion_partition(&summary, CompletionStatus::Incomplete);
        assert_eq!(incomplete.title, "Order Status - Incomplete");
        assert_eq!(incomplete.len(), 2);
    }

    #[test]
    fn test_sku_drilldowns() {
        let orders = vec![order("P1", "A", "Complete"), order("P2", "A", "incomplete")];

        let summary = sku_summary(&orders);
        assert_eq!(summary.len(), 1);
        assert_eq!(summary.rows[0].po_count, 2);

        let monthly = sku_summary_for_month(&orders, "2025-12");
        assert_eq!(monthly.title, "Top SKUs - December 2025");
        assert_eq!(monthly.len(), 1);

        let list = prepare_sku_list(&orders, Some("2025-12"));
        let details = sku_details(&list[0]);
        assert_eq!(details.title, "SKU Details - A");
        assert_eq!(details.len(), 2);
    }

    #[test]
    fn test_item_master_list() {
        let table = item_master_list(&[ItemMasterRecord::default()]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.columns[0], "itemCode");
    }
}
