use clap::Parser;
use std::path::PathBuf;

use crate::shared::config::is_month_key;

#[derive(Parser, Debug)]
#[command(name = "order-dashboard")]
#[command(about = "Order and sales dashboard report", long_about = None)]
#[command(version)]
pub struct Args {
    /// Path to config.toml (defaults to next to the executable, then the working directory)
    pub config: Option<PathBuf>,

    /// Print a text summary instead of the JSON report
    #[arg(long)]
    pub summary: bool,

    /// Open the SKU view for this SKU
    #[arg(long)]
    pub sku: Option<String>,

    /// Recompute the KPI cards for one month (YYYY-MM)
    #[arg(long, value_parser = month_arg)]
    pub month: Option<String>,

    /// Compare the monthly dispatch of two SKUs
    #[arg(long, num_args = 2, value_names = ["SKU_A", "SKU_B"])]
    pub compare: Option<Vec<String>>,
}

impl Args {
    /// The `--compare` pair, when given
    pub fn compare_pair(&self) -> Option<(String, String)> {
        match self.compare.as_deref() {
            Some([a, b]) => Some((a.clone(), b.clone())),
            _ => None,
        }
    }
}

fn month_arg(raw: &str) -> Result<String, String> {
    if is_month_key(raw) {
        Ok(raw.to_string())
    } else {
        Err(format!("expected YYYY-MM, got {raw:?}"))
    }
}
