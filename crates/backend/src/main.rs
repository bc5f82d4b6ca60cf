use clap::Parser;

use backend::cli::Args;
use backend::dashboards::report::{build_report, ReportContext};
use backend::shared::config::load_config;
use backend::shared::data::loader::load_ledgers;
use backend::shared::format::{format_count, format_indian, format_lakh, format_percent};
use backend::shared::view_state::transition;
use backend::system;
use contracts::dashboards::report::DashboardReport;
use contracts::shared::view_state::{DashboardState, ViewEvent};

fn print_summary(report: &DashboardReport) {
    let kpi = &report.kpis.kpi;
    let financial = &report.kpis.financial;

    println!("Reference date:      {}", report.clock.reference_date);
    println!("YTD sales:           {}", format_lakh(kpi.ytd_sales));
    println!("Avg monthly sale:    {}", format_lakh(kpi.avg_monthly_sale));
    println!(
        "Sales ({}):     {}",
        kpi.current_month,
        format_lakh(kpi.current_month_sales)
    );
    println!(
        "Invoices:            {} ({} outstanding)",
        format_count(financial.total_invoice_count),
        format_lakh(financial.outstanding_amount_lakh)
    );
    println!("Pending dispatch:    {}", format_lakh(report.kpis.pending_dispatch_lakh));
    println!("Unique POs:          {}", format_count(kpi.unique_pos));
    println!("SKUs:                {}", format_count(kpi.total_sku));
    println!("Completion rate:     {}", format_percent(kpi.completion_rate));
    println!("Item master codes:   {}", format_count(report.kpis.item_master_count));

    println!("\nMonthly sales:");
    for ((label, sales), growth) in report
        .sales_series
        .labels
        .iter()
        .zip(&report.sales_series.sales)
        .zip(&report.sales_series.growth)
    {
        println!("  {:<16} {:>14} {:>8}", label, format_lakh(*sales), format_percent(*growth));
    }

    println!("\nTop SKUs by dispatch:");
    for row in &report.top_skus.top {
        println!(
            "  {:<32} {:>12} ({})",
            row.sku,
            format_indian(row.total_dispatch, 0),
            format_percent(report.top_skus.share_percent(row))
        );
    }

    if let Some(snapshot) = &report.month_snapshot {
        println!("\nMonth {}:", snapshot.month);
        println!("  Sales:             {}", format_lakh(snapshot.kpi.ytd_sales));
        println!("  POs:               {}", format_count(snapshot.kpi.unique_pos));
        println!("  Pending dispatch:  {}", format_lakh(snapshot.pending_dispatch_lakh));
        println!("  Completion rate:   {}", format_percent(snapshot.kpi.completion_rate));
    }

    if let Some(cmp) = &report.sku_comparison {
        println!("\nDispatch: {} vs {}", cmp.sku_a, cmp.sku_b);
        for ((label, a), b) in cmp.labels.iter().zip(&cmp.a_values).zip(&cmp.b_values) {
            println!(
                "  {:<16} {:>12} {:>12}",
                label,
                format_indian(*a, 0),
                format_indian(*b, 0)
            );
        }
    }
}

fn main() -> anyhow::Result<()> {
    system::tracing::initialize()?;
    let args = Args::parse();

    let config = load_config(args.config.as_deref())?;
    let today = chrono::Local::now().date_naive();
    let mut ctx = ReportContext::from_config(&config.report, today)?;
    ctx.compare = args.compare_pair();
    ctx.snapshot_month = args.month;
    tracing::info!(
        "Reporting for {} (reference date {})",
        ctx.clock.current_month,
        ctx.clock.reference_date
    );

    let ledgers = load_ledgers(&config)?;

    let view = match args.sku {
        Some(sku) => transition(DashboardState::default(), ViewEvent::SelectSku { sku }),
        None => DashboardState::default(),
    };
    let report = build_report(&ledgers, &ctx, &view);

    if args.summary {
        print_summary(&report);
    } else {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(())
}
