use chrono::NaiveDate;
use contracts::dashboards::d401_monthly_series::ReportMonth;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::dashboards::d400_kpi_summary::service::DEFAULT_REFERENCE_DATE;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub report: ReportConfig,
    #[serde(default)]
    pub data: DataConfig,
    /// Directory relative data paths are resolved against
    #[serde(skip)]
    pub base_dir: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReportConfig {
    /// Outstanding-invoice cutoff, "YYYY-MM-DD"
    #[serde(default = "default_reference_date")]
    pub reference_date: String,
    /// "YYYY-MM"; the wall clock decides when absent
    #[serde(default)]
    pub current_month: Option<String>,
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    /// Sales series window
    pub window: Vec<ReportMonth>,
    /// PO series window, defaults to `window`
    #[serde(default)]
    pub po_window: Option<Vec<ReportMonth>>,
}

fn default_reference_date() -> String {
    DEFAULT_REFERENCE_DATE.to_string()
}

fn default_top_n() -> usize {
    8
}

/// Ledger locations. `source` points at a combined data-source script and
/// takes precedence over the per-ledger files.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct DataConfig {
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub sales: Option<String>,
    #[serde(default)]
    pub orders: Option<String>,
    #[serde(default)]
    pub item_master: Option<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("reference_date must be YYYY-MM-DD, got {0:?}")]
    InvalidReferenceDate(String),
    #[error("month key must be YYYY-MM, got {0:?}")]
    InvalidMonth(String),
    #[error("report window must list at least one month")]
    EmptyWindow,
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[report]
reference_date = "2025-12-20"
top_n = 8
window = [
    { key = "2025-10", label = "October 2025" },
    { key = "2025-11", label = "November 2025" },
    { key = "2025-12", label = "December 2025" },
    { key = "2026-01", label = "January 2026" },
    { key = "2026-02", label = "February 2026" },
]
po_window = [
    { key = "2025-10", label = "October 2025" },
    { key = "2025-11", label = "November 2025" },
    { key = "2025-12", label = "December 2025" },
]

[data]
sales = "data/sales_book.json"
orders = "data/order_book.json"
item_master = "data/item_master.json"
"#;

/// True for a real calendar month written as "YYYY-MM"
pub fn is_month_key(key: &str) -> bool {
    key.len() == 7 && NaiveDate::parse_from_str(&format!("{key}-01"), "%Y-%m-%d").is_ok()
}

pub fn parse_reference_date(raw: &str) -> Result<NaiveDate, ConfigError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| ConfigError::InvalidReferenceDate(raw.to_string()))
}

impl ReportConfig {
    pub fn po_window(&self) -> &[ReportMonth] {
        self.po_window.as_deref().unwrap_or(&self.window)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        parse_reference_date(&self.reference_date)?;
        if let Some(month) = &self.current_month {
            if !is_month_key(month) {
                return Err(ConfigError::InvalidMonth(month.clone()));
            }
        }
        if self.window.is_empty() || self.po_window().is_empty() {
            return Err(ConfigError::EmptyWindow);
        }
        if let Some(bad) = self
            .window
            .iter()
            .chain(self.po_window())
            .find(|m| !is_month_key(&m.key))
        {
            return Err(ConfigError::InvalidMonth(bad.key.clone()));
        }
        Ok(())
    }
}

fn parse_config(contents: &str, base_dir: PathBuf) -> anyhow::Result<Config> {
    let mut config: Config = toml::from_str(contents)?;
    config.report.validate()?;
    config.base_dir = base_dir;
    Ok(config)
}

fn read_config(path: &Path) -> anyhow::Result<Config> {
    tracing::info!("Loading config from: {}", path.display());
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("cannot read {}: {e}", path.display()))?;
    let base_dir = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    parse_config(&contents, base_dir)
}

/// Load configuration from config.toml
///
/// Search order:
/// 1. Explicit path (first CLI argument)
/// 2. Next to the executable
/// 3. Current working directory
/// 4. Falls back to embedded default config
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    if let Some(path) = explicit {
        return read_config(path);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");
            if config_path.exists() {
                return read_config(&config_path);
            }
            tracing::debug!("config.toml not found at: {}", config_path.display());
        }
    }

    let local = PathBuf::from("config.toml");
    if local.exists() {
        return read_config(&local);
    }

    tracing::info!("Using default embedded configuration");
    parse_config(DEFAULT_CONFIG, PathBuf::from("."))
}

/// Resolves a configured data path; relative paths are taken relative to the
/// directory of the config file
pub fn resolve_data_path(config: &Config, raw: &str) -> PathBuf {
    let path = Path::new(raw);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        config.base_dir.join(path)
    }
}
