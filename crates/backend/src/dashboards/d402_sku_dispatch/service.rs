use contracts::dashboards::d402_sku_dispatch::{
    MonthRank, MonthlyDispatchSeries, SkuComparison, SkuListRow, SkuMonthlyDispatch,
    SkuSummaryRow, TopSkuRow, TopSkus,
};
use contracts::domain::OrderRecord;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use crate::shared::normalize::{is_incomplete, is_truthy, month_key, month_label, or_zero};

/// Per-SKU running totals, kept in first-seen order
struct SkuTotals<'a> {
    sku: &'a str,
    brand: Option<&'a str>,
    total_order: f64,
    total_dispatch: f64,
    po_numbers: HashSet<&'a str>,
}

/// Groups order lines by SKU. Lines without a SKU are skipped; the result
/// keeps the order in which SKUs first appear.
fn group_by_sku<'a>(orders: impl IntoIterator<Item = &'a OrderRecord>) -> Vec<SkuTotals<'a>> {
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut groups: Vec<SkuTotals<'a>> = Vec::new();

    for o in orders {
        if o.sku.is_empty() {
            continue;
        }
        let slot = *index.entry(o.sku.as_str()).or_insert_with(|| {
            groups.push(SkuTotals {
                sku: o.sku.as_str(),
                brand: o.brand.as_deref(),
                total_order: 0.0,
                total_dispatch: 0.0,
                po_numbers: HashSet::new(),
            });
            groups.len() - 1
        });

        let group = &mut groups[slot];
        group.total_order += or_zero(o.order_qty);
        group.total_dispatch += or_zero(o.disp_qty);
        if !o.po_number.is_empty() {
            group.po_numbers.insert(o.po_number.as_str());
        }
    }

    groups
}

/// Descending by dispatched quantity. The sort is stable, so ties keep the
/// first-seen SKU order.
fn sort_by_dispatch(groups: &mut [SkuTotals<'_>]) {
    groups.sort_by(|a, b| b.total_dispatch.total_cmp(&a.total_dispatch));
}

fn summary_rows(groups: Vec<SkuTotals<'_>>) -> Vec<SkuSummaryRow> {
    groups
        .into_iter()
        .map(|g| SkuSummaryRow {
            sku: g.sku.to_string(),
            dispatch_qty: g.total_dispatch,
            po_count: g.po_numbers.len(),
        })
        .collect()
}

/// One row per SKU: dispatched quantity and distinct POs, highest dispatch
/// first
pub fn prepare_sku_summary(orders: &[OrderRecord]) -> Vec<SkuSummaryRow> {
    let mut groups = group_by_sku(orders);
    sort_by_dispatch(&mut groups);
    summary_rows(groups)
}

/// SKU summary restricted to lines dated in `month` ("YYYY-MM")
pub fn prepare_monthly_sku_summary(orders: &[OrderRecord], month: &str) -> Vec<SkuSummaryRow> {
    let mut groups = group_by_sku(
        orders
            .iter()
            .filter(|o| !o.date.is_empty() && month_key(&o.date) == month),
    );
    sort_by_dispatch(&mut groups);
    summary_rows(groups)
}

/// The `limit` SKUs with the highest dispatch, plus the dispatch total across
/// all SKUs
pub fn prepare_top_skus(orders: &[OrderRecord], limit: usize) -> TopSkus {
    let mut groups = group_by_sku(orders);
    sort_by_dispatch(&mut groups);

    let total_dispatch_qty = groups.iter().map(|g| g.total_dispatch).sum();
    let top = groups
        .into_iter()
        .take(limit)
        .map(|g| TopSkuRow {
            sku: g.sku.to_string(),
            brand: g.brand.map(str::to_string),
            total_order: g.total_order,
            total_dispatch: g.total_dispatch,
            po_count: g.po_numbers.len(),
        })
        .collect();

    TopSkus {
        top,
        total_dispatch_qty,
    }
}

/// Dispatch of every SKU per month. Lines without a date or without a
/// dispatched quantity are skipped. A line counts as its own `po_count` when
/// set, otherwise as one PO.
pub fn prepare_all_skus_monthly_dispatch(orders: &[OrderRecord]) -> MonthlyDispatchSeries {
    let mut by_month: BTreeMap<&str, (f64, f64)> = BTreeMap::new();
    for o in orders {
        if o.date.is_empty() || !is_truthy(o.disp_qty) {
            continue;
        }
        let po_count = if is_truthy(o.po_count) {
            or_zero(o.po_count)
        } else {
            1.0
        };
        let bucket = by_month.entry(month_key(&o.date)).or_insert((0.0, 0.0));
        bucket.0 += or_zero(o.disp_qty);
        bucket.1 += po_count;
    }

    let mut series = MonthlyDispatchSeries::default();
    for (month, (qty, pos)) in by_month {
        series.months.push(month.to_string());
        series.labels.push(month_label(month));
        series.values.push(qty);
        series.po_counts.push(pos);
    }
    series
}

/// Unnamed SKUs are never grouped, so an empty `sku` gives an empty map
fn monthly_dispatch_of(orders: &[OrderRecord], sku: &str) -> BTreeMap<String, f64> {
    let mut by_month = BTreeMap::new();
    if sku.is_empty() {
        return by_month;
    }
    for o in orders.iter().filter(|o| o.sku == sku) {
        let month = month_key(&o.date);
        if month.is_empty() {
            continue;
        }
        *by_month.entry(month.to_string()).or_insert(0.0) += or_zero(o.disp_qty);
    }
    by_month
}

/// Dispatch of one SKU per month, months ascending
pub fn prepare_sku_monthly_dispatch(orders: &[OrderRecord], sku: &str) -> SkuMonthlyDispatch {
    let by_month = monthly_dispatch_of(orders, sku);
    SkuMonthlyDispatch {
        sku: sku.to_string(),
        labels: by_month.keys().map(|m| month_label(m)).collect(),
        values: by_month.values().copied().collect(),
        months: by_month.into_keys().collect(),
    }
}

/// Two SKUs aligned on the sorted union of their months; a month missing for
/// one SKU reads as zero
pub fn prepare_sku_comparison(orders: &[OrderRecord], sku_a: &str, sku_b: &str) -> SkuComparison {
    let a = monthly_dispatch_of(orders, sku_a);
    let b = monthly_dispatch_of(orders, sku_b);

    let months: Vec<String> = a
        .keys()
        .chain(b.keys())
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    SkuComparison {
        sku_a: sku_a.to_string(),
        sku_b: sku_b.to_string(),
        labels: months.iter().map(|m| month_label(m)).collect(),
        a_values: months.iter().map(|m| a.get(m).copied().unwrap_or(0.0)).collect(),
        b_values: months.iter().map(|m| b.get(m).copied().unwrap_or(0.0)).collect(),
        months,
    }
}

fn rank_months(
    months: &[String],
    labels: &[String],
    values: &[f64],
    po_counts: Option<&[f64]>,
) -> Vec<MonthRank> {
    let mut rows: Vec<MonthRank> = months
        .iter()
        .zip(labels)
        .zip(values)
        .enumerate()
        .map(|(i, ((month, label), qty))| MonthRank {
            rank: 0,
            month: month.clone(),
            label: label.clone(),
            dispatch_qty: *qty,
            po_count: po_counts.and_then(|c| c.get(i).copied()),
        })
        .collect();

    rows.sort_by(|a, b| b.dispatch_qty.total_cmp(&a.dispatch_qty));
    for (i, row) in rows.iter_mut().enumerate() {
        row.rank = i + 1;
    }
    rows
}

/// Months of the all-SKU trend, busiest first
pub fn rank_dispatch_months(series: &MonthlyDispatchSeries) -> Vec<MonthRank> {
    rank_months(
        &series.months,
        &series.labels,
        &series.values,
        Some(series.po_counts.as_slice()),
    )
}

/// Months of a single-SKU trend, busiest first
pub fn rank_sku_months(series: &SkuMonthlyDispatch) -> Vec<MonthRank> {
    rank_months(&series.months, &series.labels, &series.values, None)
}

/// SKU table for an optional month. `None` (or an empty month) lists every
/// dated line. Pending quantity counts only lines still marked incomplete.
pub fn prepare_sku_list(orders: &[OrderRecord], month: Option<&str>) -> Vec<SkuListRow> {
    let month = month.filter(|m| !m.is_empty());
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut rows: Vec<SkuListRow> = Vec::new();

    for o in orders {
        if o.date.is_empty() || o.sku.is_empty() {
            continue;
        }
        if month.is_some_and(|m| month_key(&o.date) != m) {
            continue;
        }

        let slot = *index.entry(o.sku.as_str()).or_insert_with(|| {
            rows.push(SkuListRow {
                sku: o.sku.clone(),
                po_count: 0,
                order_qty: 0.0,
                dispatch_qty: 0.0,
                pending_qty: 0.0,
                value: 0.0,
                rows: Vec::new(),
            });
            rows.len() - 1
        });

        let order_qty = or_zero(o.order_qty);
        let disp_qty = or_zero(o.disp_qty);
        let row = &mut rows[slot];
        row.po_count += 1;
        row.order_qty += order_qty;
        row.dispatch_qty += disp_qty;
        if is_incomplete(&o.status) {
            row.pending_qty += order_qty - disp_qty;
        }
        row.value += or_zero(o.value);
        row.rows.push(o.clone());
    }

    rows.sort_by(|a, b| b.dispatch_qty.total_cmp(&a.dispatch_qty));
    rows
}
