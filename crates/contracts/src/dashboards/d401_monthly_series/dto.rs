use serde::{Deserialize, Serialize};

/// One bucket of a fixed reporting window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportMonth {
    /// Month key, "YYYY-MM"
    pub key: String,
    /// Display label; derived from the key when absent
    #[serde(default)]
    pub label: Option<String>,
}

impl ReportMonth {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            label: None,
        }
    }

    pub fn with_label(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: Some(label.to_string()),
        }
    }
}

/// Direction of month-over-month change, drives the bar colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthTrend {
    Positive,
    Negative,
    Flat,
}

impl GrowthTrend {
    pub fn from_growth(growth: f64) -> Self {
        if growth > 0.0 {
            GrowthTrend::Positive
        } else if growth < 0.0 {
            GrowthTrend::Negative
        } else {
            GrowthTrend::Flat
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            GrowthTrend::Positive => "#4caf50",
            GrowthTrend::Negative => "#f44336",
            GrowthTrend::Flat => "#1a237e",
        }
    }
}

/// Monthly sales over the reporting window. All vectors have one entry per
/// window month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesSeries {
    pub months: Vec<String>,
    pub labels: Vec<String>,
    /// Sales per month, in lakh
    pub sales: Vec<f64>,
    /// Month-over-month growth, in percent
    pub growth: Vec<f64>,
    pub cumulative: Vec<f64>,
    pub trends: Vec<GrowthTrend>,
}

impl SalesSeries {
    pub fn bar_colors(&self) -> Vec<&'static str> {
        self.trends.iter().map(GrowthTrend::color).collect()
    }
}

/// Monthly purchase orders over the reporting window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoSeries {
    pub months: Vec<String>,
    pub labels: Vec<String>,
    /// Order lines with a non-zero value
    pub po_count: Vec<usize>,
    /// Order value per month, in lakh
    pub po_value: Vec<f64>,
    pub growth: Vec<f64>,
}
