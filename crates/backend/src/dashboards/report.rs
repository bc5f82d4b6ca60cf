use chrono::NaiveDate;
use contracts::dashboards::d400_kpi_summary::ReportClock;
use contracts::dashboards::d401_monthly_series::ReportMonth;
use contracts::dashboards::d404_drilldown::KpiDrilldowns;
use contracts::dashboards::report::DashboardReport;
use contracts::domain::Ledgers;
use contracts::shared::view_state::DashboardState;

use super::d400_kpi_summary::service::{get_kpi_summary, monthly_snapshot};
use super::d401_monthly_series::service::{
    prepare_monthly_po_series, prepare_monthly_sales_series,
};
use super::d402_sku_dispatch::service::{
    prepare_all_skus_monthly_dispatch, prepare_sku_comparison, prepare_sku_list,
    prepare_sku_monthly_dispatch, prepare_sku_summary, prepare_top_skus, rank_dispatch_months,
};
use super::d403_order_completion::service::prepare_order_completion_status;
use super::d404_drilldown::service as drilldown;
use crate::shared::config::{parse_reference_date, ConfigError, ReportConfig};
use crate::shared::view_state::restored_sku;

/// Inputs of a reporting pass besides the ledgers themselves
#[derive(Debug, Clone, PartialEq)]
pub struct ReportContext {
    pub clock: ReportClock,
    pub top_n: usize,
    pub sales_window: Vec<ReportMonth>,
    pub po_window: Vec<ReportMonth>,
    /// Month picked in the month filter, "YYYY-MM"
    pub snapshot_month: Option<String>,
    /// SKU pair for the side-by-side trend
    pub compare: Option<(String, String)>,
}

impl ReportContext {
    /// `today` only decides the current month when the config leaves it out
    pub fn from_config(config: &ReportConfig, today: NaiveDate) -> Result<Self, ConfigError> {
        config.validate()?;
        let current_month = config
            .current_month
            .clone()
            .unwrap_or_else(|| today.format("%Y-%m").to_string());

        Ok(Self {
            clock: ReportClock {
                reference_date: parse_reference_date(&config.reference_date)?,
                current_month,
            },
            top_n: config.top_n,
            sales_window: config.window.clone(),
            po_window: config.po_window().to_vec(),
            snapshot_month: None,
            compare: None,
        })
    }
}

/// Computes every dashboard output for one pass over the ledgers.
///
/// Pure: the same ledgers, context and view always give the same report.
pub fn build_report(
    ledgers: &Ledgers,
    ctx: &ReportContext,
    view: &DashboardState,
) -> DashboardReport {
    let Ledgers {
        sales,
        orders,
        item_master,
    } = ledgers;
    tracing::debug!(
        "Building report: {} sales, {} orders, {} items, month {}",
        sales.len(),
        orders.len(),
        item_master.len(),
        ctx.clock.current_month
    );

    let kpis = get_kpi_summary(orders, sales, item_master, &ctx.clock);
    let all_skus_trend = prepare_all_skus_monthly_dispatch(orders);
    let all_skus_rank = rank_dispatch_months(&all_skus_trend);
    let selected_sku_trend =
        restored_sku(view).map(|sku| prepare_sku_monthly_dispatch(orders, sku));
    let completion = prepare_order_completion_status(orders);
    let completion_pie = completion.pie();

    let drilldowns = KpiDrilldowns {
        outstanding_invoices: drilldown::outstanding_invoices(sales, ctx.clock.reference_date),
        pending_dispatch: drilldown::pending_dispatch_orders(orders),
        ytd_sales: drilldown::ytd_sales(sales),
        current_month_sales: drilldown::current_month_sales(sales, &ctx.clock.current_month),
        completion_rate: drilldown::completion_rate_orders(orders),
        sku_summary: drilldown::sku_summary(orders),
        item_master: drilldown::item_master_list(item_master),
    };

    let report = DashboardReport {
        clock: ctx.clock.clone(),
        sales_series: prepare_monthly_sales_series(sales, &ctx.sales_window),
        po_series: prepare_monthly_po_series(orders, &ctx.po_window),
        top_skus: prepare_top_skus(orders, ctx.top_n),
        sku_summary: prepare_sku_summary(orders),
        sku_list: prepare_sku_list(orders, Some(&ctx.clock.current_month)),
        kpis,
        all_skus_trend,
        all_skus_rank,
        selected_sku_trend,
        completion,
        completion_pie,
        drilldowns,
        view: view.clone(),
        month_snapshot: ctx
            .snapshot_month
            .as_deref()
            .map(|month| monthly_snapshot(orders, sales, month, &ctx.clock)),
        sku_comparison: ctx
            .compare
            .as_ref()
            .map(|(a, b)| prepare_sku_comparison(orders, a, b)),
    };

    tracing::info!(
        "Report ready: YTD {:.2} L, {} SKUs, {} pending dispatch lines",
        report.kpis.kpi.ytd_sales,
        report.kpis.kpi.total_sku,
        report.drilldowns.pending_dispatch.len()
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::{ItemMasterRecord, OrderRecord, SalesRecord};
    use contracts::shared::view_state::{ViewEvent, ViewMode};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use crate::shared::view_state::transition;

    fn context() -> ReportContext {
        ReportContext {
            clock: ReportClock {
                reference_date: NaiveDate::from_ymd_opt(2025, 12, 20).unwrap(),
                current_month: "2025-12".into(),
            },
            top_n: 8,
            sales_window: vec![
                ReportMonth::new("2025-11"),
                ReportMonth::new("2025-12"),
                ReportMonth::new("2026-01"),
            ],
            po_window: vec![ReportMonth::new("2025-11"), ReportMonth::new("2025-12")],
            snapshot_month: None,
            compare: None,
        }
    }

    fn ledgers() -> Ledgers {
        let sale = |inv: &str, date: &str, due: &str, value: f64| SalesRecord {
            invoice_no: inv.into(),
            date: date.into(),
            due_date: due.into(),
            value: Some(value),
            ..Default::default()
        };
        let order = |po: &str, sku: &str, date: &str, status: &str, disp: f64, value: f64| {
            OrderRecord {
                po_number: po.into(),
                sku: sku.into(),
                date: date.into(),
                status: status.into(),
                order_qty: Some(disp + 10.0),
                disp_qty: Some(disp),
                value: Some(value),
                ..Default::default()
            }
        };

        Ledgers {
            sales: vec![
                sale("INV-1", "2025-11-05", "2025-12-05", 200_000.0),
                sale("INV-2", "2025-12-02", "2026-01-02", 300_000.0),
            ],
            orders: vec![
                order("PO-1", "Label A", "2025-11-03", "Complete", 100.0, 150_000.0),
                order("PO-2", "Label B", "2025-12-04", "incomplete", 40.0, 50_000.0),
                order("PO-3", "Label A", "2025-12-09", "incomplete", 70.0, 100_000.0),
            ],
            item_master: vec![ItemMasterRecord {
                item_code: "IT-1".into(),
                ..Default::default()
            }],
        }
    }

    #[test]
    fn test_from_config_uses_today_when_month_missing() {
        let config = ReportConfig {
            reference_date: "2025-12-20".into(),
            current_month: None,
            top_n: 5,
            window: vec![ReportMonth::new("2025-12")],
            po_window: None,
        };
        let today = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();

        let ctx = ReportContext::from_config(&config, today).unwrap();

        assert_eq!(ctx.clock.current_month, "2026-03");
        assert_eq!(ctx.po_window, ctx.sales_window);
        assert_eq!(ctx.top_n, 5);
    }

    #[test]
    fn test_from_config_rejects_bad_date() {
        let config = ReportConfig {
            reference_date: "yesterday".into(),
            current_month: Some("2025-12".into()),
            top_n: 8,
            window: vec![ReportMonth::new("2025-12")],
            po_window: None,
        };
        let today = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        assert_eq!(
            ReportContext::from_config(&config, today),
            Err(ConfigError::InvalidReferenceDate("yesterday".into()))
        );
    }

    #[test]
    fn test_build_report() {
        let report = build_report(&ledgers(), &context(), &DashboardState::default());

        assert_eq!(report.kpis.financial.total_invoice_count, 2);
        assert!((report.kpis.financial.outstanding_amount_lakh - 2.0).abs() < 1e-9);
        assert!((report.kpis.pending_dispatch_lakh - 1.5).abs() < 1e-9);
        assert_eq!(report.kpis.item_master_count, 1);

        assert_eq!(report.sales_series.months.len(), 3);
        assert_eq!(report.sales_series.sales, vec![2.0, 3.0, 0.0]);
        assert_eq!(report.po_series.po_count, vec![1, 2]);

        assert_eq!(report.top_skus.top[0].sku, "Label A");
        assert_eq!(report.all_skus_trend.months, vec!["2025-11", "2025-12"]);
        assert_eq!(report.all_skus_rank[0].month, "2025-12");
        assert_eq!(report.selected_sku_trend, None);

        assert_eq!(report.completion.completed.count, 1);
        assert_eq!(report.completion_pie.counts, vec![1, 2]);

        // current month only
        assert_eq!(report.sku_list.len(), 2);
        assert_eq!(report.drilldowns.current_month_sales.len(), 1);
        assert_eq!(report.drilldowns.outstanding_invoices.len(), 1);
        assert_eq!(report.drilldowns.pending_dispatch.len(), 2);
        assert_eq!(report.month_snapshot, None);
        assert_eq!(report.sku_comparison, None);
    }

    #[test]
    fn test_month_filter_and_comparison() {
        let ctx = ReportContext {
            snapshot_month: Some("2025-11".into()),
            compare: Some(("Label A".into(), "Label B".into())),
            ..context()
        };

        let report = build_report(&ledgers(), &ctx, &DashboardState::default());

        let snapshot = report.month_snapshot.unwrap();
        assert_eq!(snapshot.month, "2025-11");
        assert_eq!(snapshot.kpi.unique_pos, 1);
        assert!((snapshot.kpi.ytd_sales - 2.0).abs() < 1e-9);

        let cmp = report.sku_comparison.unwrap();
        assert_eq!(cmp.months, vec!["2025-11", "2025-12"]);
        assert_eq!(cmp.a_values, vec![100.0, 70.0]);
        assert_eq!(cmp.b_values, vec![0.0, 40.0]);
    }

    #[test]
    fn test_selected_sku_trend_follows_view() {
        let view = transition(
            DashboardState::default(),
            ViewEvent::SelectSku {
                sku: "Label A".into(),
            },
        );
        let report = build_report(&ledgers(), &context(), &view);

        assert_eq!(report.view.current_view, ViewMode::Sku);
        let trend = report.selected_sku_trend.unwrap();
        assert_eq!(trend.sku, "Label A");
        assert_eq!(trend.values, vec![100.0, 70.0]);
    }

    #[test]
    fn test_empty_ledgers() {
        let report = build_report(&Ledgers::default(), &context(), &DashboardState::default());
        assert_eq!(report.sales_series.sales, vec![0.0, 0.0, 0.0]);
        assert!(report.top_skus.top.is_empty());
        assert!(report.sku_list.is_empty());
        assert_eq!(report.completion.total_count(), 0);
    }

    proptest! {
        #[test]
        fn prop_report_is_deterministic(
            values in prop::collection::vec(0.0f64..1e6, 0..12),
            day in 1u32..28,
        ) {
            let sales: Vec<SalesRecord> = values
                .iter()
                .enumerate()
                .map(|(i, v)| SalesRecord {
                    invoice_no: format!("INV-{}", i % 4),
                    date: format!("2025-{:02}-{:02}", 10 + (i % 3), day),
                    value: Some(*v),
                    ..Default::default()
                })
                .collect();
            let ledgers = Ledgers { sales, ..Default::default() };
            let ctx = context();

            let first = build_report(&ledgers, &ctx, &DashboardState::default());
            let second = build_report(&ledgers, &ctx, &DashboardState::default());

            prop_assert_eq!(first.sales_series.months.len(), ctx.sales_window.len());
            prop_assert_eq!(first.po_series.months.len(), ctx.po_window.len());
            prop_assert_eq!(first, second);
        }
    }
}
