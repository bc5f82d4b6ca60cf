use serde::{Deserialize, Serialize};

use crate::domain::common::lenient;

/// Item master entry. Only counted and listed, never aggregated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemMasterRecord {
    #[serde(default, deserialize_with = "lenient::string")]
    pub item_code: String,

    #[serde(default, deserialize_with = "lenient::string")]
    pub jobs_name: String,

    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub customer_name: Option<String>,

    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub label_size: Option<String>,

    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub material: Option<String>,

    /// Units on hand
    #[serde(default, deserialize_with = "lenient::number")]
    pub inventory: Option<f64>,

    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub artwork_id: Option<String>,

    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub artwork_file: Option<String>,
}
