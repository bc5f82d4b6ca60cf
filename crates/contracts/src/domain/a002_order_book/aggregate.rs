use serde::{Deserialize, Serialize};

use crate::domain::common::lenient;

/// One line of the order book (ORDER BOOK sheet).
///
/// A purchase order spans several lines, one per job (SKU). `status` is free
/// text and is only ever compared case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    #[serde(default, deserialize_with = "lenient::string")]
    pub po_number: String,

    /// SKU / job identifier
    #[serde(rename = "jobName", default, deserialize_with = "lenient::string")]
    pub sku: String,

    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub brand: Option<String>,

    /// PO login date (YYYY-MM-DD after ingestion)
    #[serde(default, deserialize_with = "lenient::date")]
    pub date: String,

    #[serde(default, deserialize_with = "lenient::number")]
    pub order_qty: Option<f64>,

    #[serde(default, deserialize_with = "lenient::number")]
    pub disp_qty: Option<f64>,

    /// Explicit PO count carried by pre-aggregated rows
    #[serde(default, deserialize_with = "lenient::number")]
    pub po_count: Option<f64>,

    #[serde(default, deserialize_with = "lenient::string")]
    pub status: String,

    #[serde(default, deserialize_with = "lenient::string")]
    pub invoice_no: String,

    /// Line value in rupees
    #[serde(default, deserialize_with = "lenient::number")]
    pub value: Option<f64>,

    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub link: Option<String>,

    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub po_pdf: Option<String>,

    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub stage: Option<String>,
}
