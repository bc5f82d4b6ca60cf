use contracts::dashboards::d401_monthly_series::{GrowthTrend, PoSeries, ReportMonth, SalesSeries};
use contracts::domain::{OrderRecord, SalesRecord};
use std::collections::HashMap;

use crate::shared::normalize::{is_truthy, month_key, month_label, or_zero, to_lakh};

/// Month-over-month growth in percent. The first bucket is 0; a zero
/// previous value divides by 1 instead.
pub fn growth_rates(values: &[f64]) -> Vec<f64> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            if i == 0 {
                return 0.0;
            }
            let prev = values[i - 1];
            let base = if prev == 0.0 { 1.0 } else { prev };
            (v - prev) / base * 100.0
        })
        .collect()
}

/// Running total
pub fn cumulative(values: &[f64]) -> Vec<f64> {
    values
        .iter()
        .scan(0.0, |acc, v| {
            *acc += v;
            Some(*acc)
        })
        .collect()
}

/// Window labels, falling back to the derived month name
pub fn window_labels(window: &[ReportMonth]) -> Vec<String> {
    window
        .iter()
        .map(|m| m.label.clone().unwrap_or_else(|| month_label(&m.key)))
        .collect()
}

fn window_keys(window: &[ReportMonth]) -> Vec<String> {
    window.iter().map(|m| m.key.clone()).collect()
}

/// Monthly sales over a fixed window. Every window month gets a bucket,
/// zero when no sale falls in it.
pub fn prepare_monthly_sales_series(sales: &[SalesRecord], window: &[ReportMonth]) -> SalesSeries {
    let mut by_month: HashMap<&str, f64> = HashMap::new();
    for s in sales {
        *by_month.entry(month_key(&s.date)).or_insert(0.0) += or_zero(s.value);
    }

    let series: Vec<f64> = window
        .iter()
        .map(|m| to_lakh(by_month.get(m.key.as_str()).copied().unwrap_or(0.0)))
        .collect();
    let growth = growth_rates(&series);
    let trends = growth.iter().map(|g| GrowthTrend::from_growth(*g)).collect();

    SalesSeries {
        months: window_keys(window),
        labels: window_labels(window),
        cumulative: cumulative(&series),
        sales: series,
        growth,
        trends,
    }
}

/// Monthly order count and value over a fixed window. Only lines with a
/// non-zero value are counted.
pub fn prepare_monthly_po_series(orders: &[OrderRecord], window: &[ReportMonth]) -> PoSeries {
    let mut by_month: HashMap<&str, (usize, f64)> = HashMap::new();
    for o in orders.iter().filter(|o| is_truthy(o.value)) {
        let bucket = by_month.entry(month_key(&o.date)).or_insert((0, 0.0));
        bucket.0 += 1;
        bucket.1 += or_zero(o.value);
    }

    let (po_count, po_value): (Vec<usize>, Vec<f64>) = window
        .iter()
        .map(|m| {
            let (count, value) = by_month.get(m.key.as_str()).copied().unwrap_or((0, 0.0));
            (count, to_lakh(value))
        })
        .unzip();

    PoSeries {
        months: window_keys(window),
        labels: window_labels(window),
        growth: growth_rates(&po_value),
        po_count,
        po_value,
    }
}
