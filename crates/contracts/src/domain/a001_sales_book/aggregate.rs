use serde::{Deserialize, Serialize};

use crate::domain::common::lenient;

/// One line of the sales book (SALES BOOK sheet).
///
/// `invoice_no` is not unique per line: an invoice with several jobs appears
/// once per job. Invoice counts are taken over the distinct set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesRecord {
    #[serde(default, deserialize_with = "lenient::string")]
    pub invoice_no: String,

    /// Invoice date (YYYY-MM-DD after ingestion)
    #[serde(default, deserialize_with = "lenient::date")]
    pub date: String,

    #[serde(default, deserialize_with = "lenient::date")]
    pub due_date: String,

    #[serde(default, deserialize_with = "lenient::string")]
    pub job_name: String,

    /// Invoice value in rupees
    #[serde(default, deserialize_with = "lenient::number")]
    pub value: Option<f64>,

    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub link: Option<String>,

    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub ponumber_pdf: Option<String>,

    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub stage: Option<String>,
}
