//! Ledger ingestion.
//!
//! Accepts the three ledgers as JSON arrays, CSV sheets or one combined
//! `data-source.js` script (`const orderBookData = [...]` and friends). Header
//! names are mapped onto the canonical record schema before the lenient
//! record deserializers run.

use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use contracts::domain::{ItemMasterRecord, Ledgers, OrderRecord, SalesRecord};

use crate::shared::config::{resolve_data_path, Config};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("unsupported data file (expected .json, .csv or .js): {0}")]
    UnsupportedFormat(PathBuf),
    #[error("malformed JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("malformed CSV in {path}: {source}")]
    Csv { path: PathBuf, source: csv::Error },
    #[error("{0} does not hold an array of records")]
    NotAnArray(PathBuf),
    #[error("{path} does not define `{name}`")]
    MissingVariable { path: PathBuf, name: &'static str },
}

/// Canonical field name with the header spellings that feed it, most
/// preferred first
type FieldAliases = Vec<(&'static str, Vec<String>)>;

/// Lowercase, alphanumerics only: "Dispatch Qty" and "dispQty" both become
/// "dispatchqty"/"dispqty"
pub fn normalize_header(header: &str) -> String {
    header
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

fn aliases(table: &[(&'static str, &[&str])]) -> FieldAliases {
    table
        .iter()
        .map(|(field, names)| {
            let mut keys = vec![normalize_header(field)];
            for name in names.iter() {
                let key = normalize_header(name);
                if !keys.contains(&key) {
                    keys.push(key);
                }
            }
            (*field, keys)
        })
        .collect()
}

static ORDER_FIELDS: Lazy<FieldAliases> = Lazy::new(|| {
    aliases(&[
        ("poNumber", &["PO Number", "PO No", "PO"]),
        ("jobName", &["Job Name", "SKU", "Product", "Job"]),
        ("brand", &["Brand"]),
        ("orderQty", &["Order Qty", "Order Quantity", "Ordered"]),
        ("dispQty", &["Dispatch Qty", "Dispatch Quantity", "Dispatched"]),
        ("status", &["Status"]),
        ("date", &["Login Date", "Order Date"]),
        ("invoiceNo", &["Invoice No", "Invoice Number", "Invoice"]),
        ("value", &["Value", "Amount", "PO Value"]),
        ("link", &["Link"]),
        ("poPdf", &["PO Pdf"]),
        ("stage", &["Stage"]),
        ("poCount", &["PO Count"]),
    ])
});

static SALES_FIELDS: Lazy<FieldAliases> = Lazy::new(|| {
    aliases(&[
        ("invoiceNo", &["Invoice No", "Invoice Number", "Invoice"]),
        ("date", &["Date", "Invoice Date"]),
        ("dueDate", &["Due Date"]),
        ("jobName", &["Job Name", "SKU", "Product"]),
        ("value", &["Value", "Amount"]),
        ("link", &["Link"]),
        ("ponumberPdf", &["PO Number Pdf"]),
        ("stage", &["Stage"]),
    ])
});

static ITEM_FIELDS: Lazy<FieldAliases> = Lazy::new(|| {
    aliases(&[
        ("itemCode", &["ITEM CODE", "Item"]),
        ("jobsName", &["Job Name", "jobName"]),
        ("customerName", &["Customer Name"]),
        ("labelSize", &["Label_Size", "Label Size"]),
        ("material", &["Material", "Material Type"]),
        ("inventory", &["Inventory", "Stock"]),
        ("artworkId", &["Artwork Id"]),
        ("artworkFile", &["Artwork File"]),
    ])
});

/// A record type one of the ledgers is made of
pub trait LedgerRecord: DeserializeOwned {
    /// Name used in log lines
    const LEDGER: &'static str;
    /// Variable holding this ledger in a data-source script
    const SCRIPT_VAR: &'static str;

    fn fields() -> &'static FieldAliases;
}

impl LedgerRecord for OrderRecord {
    const LEDGER: &'static str = "order book";
    const SCRIPT_VAR: &'static str = "orderBookData";

    fn fields() -> &'static FieldAliases {
        &ORDER_FIELDS
    }
}

impl LedgerRecord for SalesRecord {
    const LEDGER: &'static str = "sales book";
    const SCRIPT_VAR: &'static str = "salesBookData";

    fn fields() -> &'static FieldAliases {
        &SALES_FIELDS
    }
}

impl LedgerRecord for ItemMasterRecord {
    const LEDGER: &'static str = "item master";
    const SCRIPT_VAR: &'static str = "itemMasterData";

    fn fields() -> &'static FieldAliases {
        &ITEM_FIELDS
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Renames the keys of one raw row to canonical field names. For each field
/// the first non-blank alias wins; unknown columns are dropped.
pub fn canonicalize(row: &Map<String, Value>, fields: &FieldAliases) -> Map<String, Value> {
    let by_key: HashMap<String, &Value> = row
        .iter()
        .map(|(k, v)| (normalize_header(k), v))
        .collect();

    let mut out = Map::new();
    for (field, keys) in fields {
        let found = keys
            .iter()
            .filter_map(|k| by_key.get(k).copied())
            .find(|v| !is_blank(v));
        if let Some(value) = found {
            out.insert((*field).to_string(), value.clone());
        }
    }
    out
}

/// Deserializes raw rows; rows that are not objects are skipped with a
/// warning
pub fn parse_rows<R: LedgerRecord>(rows: Vec<Value>) -> Vec<R> {
    let total = rows.len();
    let records: Vec<R> = rows
        .into_iter()
        .enumerate()
        .filter_map(|(i, row)| {
            let Value::Object(map) = row else {
                tracing::warn!("{}: row {} is not an object, skipped", R::LEDGER, i + 1);
                return None;
            };
            match serde_json::from_value(Value::Object(canonicalize(&map, R::fields()))) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!("{}: row {} skipped: {}", R::LEDGER, i + 1, e);
                    None
                }
            }
        })
        .collect();

    tracing::debug!("{}: {} of {} rows loaded", R::LEDGER, records.len(), total);
    records
}

fn read_text(path: &Path) -> Result<String, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(text.trim_start_matches('\u{FEFF}').to_string())
}

/// Python's json module writes `NaN`, `Infinity` and `-Infinity` as bare
/// tokens, which serde_json rejects. They become `null`; string contents are
/// left alone.
fn null_non_finite(text: &str) -> String {
    const TOKENS: [&str; 3] = ["-Infinity", "Infinity", "NaN"];

    let mut out = String::with_capacity(text.len());
    let mut in_string = false;
    let mut escaped = false;
    let mut rest = text;
    while let Some(c) = rest.chars().next() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
        } else if c == '"' {
            in_string = true;
        } else if let Some(token) = TOKENS.iter().find(|t| rest.starts_with(**t)) {
            out.push_str("null");
            rest = &rest[token.len()..];
            continue;
        }
        out.push(c);
        rest = &rest[c.len_utf8()..];
    }
    out
}

fn json_rows(text: &str, path: &Path) -> Result<Vec<Value>, LoadError> {
    let value: Value =
        serde_json::from_str(&null_non_finite(text)).map_err(|source| LoadError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    match value {
        Value::Array(rows) => Ok(rows),
        _ => Err(LoadError::NotAnArray(path.to_path_buf())),
    }
}

fn csv_rows(text: &str, path: &Path) -> Result<Vec<Value>, LoadError> {
    let csv_error = |source: csv::Error| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers().map_err(csv_error)?.clone();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        let row: Map<String, Value> = headers
            .iter()
            .zip(record.iter())
            .map(|(h, v)| (h.to_string(), Value::String(v.to_string())))
            .collect();
        rows.push(Value::Object(row));
    }
    Ok(rows)
}

/// Finds `const <name> = <json>;` in a data-source script and returns the
/// JSON value. Only the first value after `=` is read.
fn script_rows(text: &str, name: &'static str, path: &Path) -> Result<Vec<Value>, LoadError> {
    let missing = || LoadError::MissingVariable {
        path: path.to_path_buf(),
        name,
    };
    let marker = format!("const {name}");
    let start = text.find(&marker).ok_or_else(missing)? + marker.len();
    let rest = text[start..].trim_start();
    let rest = rest.strip_prefix('=').ok_or_else(missing)?;

    let cleaned = null_non_finite(rest);
    let mut stream = serde_json::Deserializer::from_str(&cleaned).into_iter::<Value>();
    match stream.next() {
        Some(Ok(Value::Array(rows))) => Ok(rows),
        Some(Ok(_)) => Err(LoadError::NotAnArray(path.to_path_buf())),
        Some(Err(source)) => Err(LoadError::Json {
            path: path.to_path_buf(),
            source,
        }),
        None => Err(missing()),
    }
}

/// Loads one ledger from a `.json` array or a `.csv` sheet
pub fn load_ledger<R: LedgerRecord>(path: &Path) -> Result<Vec<R>, LoadError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    let rows = match extension.as_deref() {
        Some("json") => json_rows(&read_text(path)?, path)?,
        Some("csv") => csv_rows(&read_text(path)?, path)?,
        _ => return Err(LoadError::UnsupportedFormat(path.to_path_buf())),
    };
    tracing::info!(
        "Loaded {} rows of {} from {}",
        rows.len(),
        R::LEDGER,
        path.display()
    );
    Ok(parse_rows(rows))
}

/// Parses the text of a data-source script. The item master is optional.
pub fn parse_script(text: &str, path: &Path) -> Result<Ledgers, LoadError> {
    let item_rows = match script_rows(text, ItemMasterRecord::SCRIPT_VAR, path) {
        Ok(rows) => rows,
        Err(LoadError::MissingVariable { .. }) => {
            tracing::warn!("{} has no item master, using an empty one", path.display());
            Vec::new()
        }
        Err(e) => return Err(e),
    };

    Ok(Ledgers {
        sales: parse_rows(script_rows(text, SalesRecord::SCRIPT_VAR, path)?),
        orders: parse_rows(script_rows(text, OrderRecord::SCRIPT_VAR, path)?),
        item_master: parse_rows(item_rows),
    })
}

pub fn load_script(path: &Path) -> Result<Ledgers, LoadError> {
    tracing::info!("Loading data source script: {}", path.display());
    parse_script(&read_text(path)?, path)
}

fn load_optional<R: LedgerRecord>(config: &Config, raw: Option<&str>) -> anyhow::Result<Vec<R>> {
    match raw {
        Some(raw) => Ok(load_ledger(&resolve_data_path(config, raw))?),
        None => {
            tracing::warn!("No {} configured, using an empty ledger", R::LEDGER);
            Ok(Vec::new())
        }
    }
}

/// Loads all ledgers named by the `[data]` section. A configured `source`
/// script wins over the per-ledger files.
pub fn load_ledgers(config: &Config) -> anyhow::Result<Ledgers> {
    let data = &config.data;
    let ledgers = match data.source.as_deref() {
        Some(source) => load_script(&resolve_data_path(config, source))?,
        None => Ledgers {
            sales: load_optional(config, data.sales.as_deref())?,
            orders: load_optional(config, data.orders.as_deref())?,
            item_master: load_optional(config, data.item_master.as_deref())?,
        },
    };
    report_data_quality(&ledgers);
    Ok(ledgers)
}

/// Counts of records the aggregations will partly ignore
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DataQuality {
    pub sales_without_date: usize,
    pub sales_without_value: usize,
    pub orders_without_date: usize,
    pub orders_without_sku: usize,
    pub orders_without_value: usize,
}

pub fn data_quality(ledgers: &Ledgers) -> DataQuality {
    DataQuality {
        sales_without_date: ledgers.sales.iter().filter(|s| s.date.is_empty()).count(),
        sales_without_value: ledgers.sales.iter().filter(|s| s.value.is_none()).count(),
        orders_without_date: ledgers.orders.iter().filter(|o| o.date.is_empty()).count(),
        orders_without_sku: ledgers.orders.iter().filter(|o| o.sku.is_empty()).count(),
        orders_without_value: ledgers.orders.iter().filter(|o| o.value.is_none()).count(),
    }
}

fn report_data_quality(ledgers: &Ledgers) {
    let q = data_quality(ledgers);
    if q.sales_without_date > 0 || q.sales_without_value > 0 {
        tracing::warn!(
            "Sales book: {} rows without date, {} without value",
            q.sales_without_date,
            q.sales_without_value
        );
    }
    if q.orders_without_date > 0 || q.orders_without_sku > 0 || q.orders_without_value > 0 {
        tracing::warn!(
            "Order book: {} rows without date, {} without SKU, {} without value",
            q.orders_without_date,
            q.orders_without_sku,
            q.orders_without_value
        );
    }
    tracing::info!(
        "Ledgers loaded: {} sales, {} orders, {} items",
        ledgers.sales.len(),
        ledgers.orders.len(),
        ledgers.item_master.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("Dispatch Qty"), "dispatchqty");
        assert_eq!(normalize_header("dispQty"), "dispqty");
        assert_eq!(normalize_header("Label_Size"), "labelsize");
    }

    #[test]
    fn test_canonicalize_prefers_first_non_blank_alias() {
        let row = object(json!({
            "jobName": "",
            "SKU": "Label A",
            "Dispatch Qty": "40",
            "Unrelated": 1
        }));

        let out = canonicalize(&row, &ORDER_FIELDS);

        assert_eq!(out.get("jobName"), Some(&json!("Label A")));
        assert_eq!(out.get("dispQty"), Some(&json!("40")));
        assert!(!out.contains_key("Unrelated"));
    }

    #[test]
    fn test_parse_rows_from_spreadsheet_headers() {
        let rows = vec![
            json!({
                "PO Number": 4501.0,
                "Job Name": "Label A",
                "Order Qty": "1,200",
                "Dispatch Qty": 800,
                "Status": "incomplete",
                "Login Date": "2025-11-03T00:00:00",
                "Value": "nan"
            }),
            json!("garbage"),
        ];

        let orders: Vec<OrderRecord> = parse_rows(rows);

        assert_eq!(orders.len(), 1);
        let o = &orders[0];
        assert_eq!(o.po_number, "4501");
        assert_eq!(o.sku, "Label A");
        assert_eq!(o.order_qty, Some(1200.0));
        assert_eq!(o.disp_qty, Some(800.0));
        assert_eq!(o.date, "2025-11-03");
        assert_eq!(o.value, None);
    }

    #[test]
    fn test_non_finite_tokens_become_null() {
        let text = r#"[{"status": "ratio: NaN", "value": NaN, "orderQty": Infinity, "dispQty": -Infinity, "link": "say \"NaN\""}]"#;

        let rows = json_rows(text, Path::new("orders.json")).unwrap();

        assert_eq!(
            rows[0],
            json!({
                "status": "ratio: NaN",
                "value": null,
                "orderQty": null,
                "dispQty": null,
                "link": "say \"NaN\""
            })
        );
    }

    #[test]
    fn test_csv_rows() {
        let text = "\u{FEFF}Invoice No,Date,Due Date,Value\nINV-1,03/11/2025,2025-12-03,\"1,000\"\n";
        let text = text.trim_start_matches('\u{FEFF}');
        let rows = csv_rows(text, Path::new("sales.csv")).unwrap();
        let sales: Vec<SalesRecord> = parse_rows(rows);

        assert_eq!(sales.len(), 1);
        assert_eq!(sales[0].invoice_no, "INV-1");
        assert_eq!(sales[0].date, "2025-11-03");
        assert_eq!(sales[0].due_date, "2025-12-03");
        assert_eq!(sales[0].value, Some(1000.0));
    }

    #[test]
    fn test_json_rows_rejects_non_array() {
        let err = json_rows("{\"a\": 1}", Path::new("x.json")).unwrap_err();
        assert!(matches!(err, LoadError::NotAnArray(_)));

        let err = json_rows("[{", Path::new("x.json")).unwrap_err();
        assert!(matches!(err, LoadError::Json { .. }));
    }

    #[test]
    fn test_parse_script() {
        let script = r#"
const orderBookData = [{"poNumber": "P1", "jobName": "Label A", "value": NaN, "status": "Complete"}];

const salesBookData = [{"invoiceNo": "INV-1", "date": "2025-12-01", "value": 5000}];
"#;

        let ledgers = parse_script(script, Path::new("data-source.js")).unwrap();

        assert_eq!(ledgers.orders.len(), 1);
        assert_eq!(ledgers.orders[0].value, None);
        assert_eq!(ledgers.sales[0].value, Some(5000.0));
        assert!(ledgers.item_master.is_empty());
    }

    #[test]
    fn test_parse_script_missing_sales() {
        let err = parse_script("const orderBookData = [];", Path::new("d.js")).unwrap_err();
        assert!(matches!(
            err,
            LoadError::MissingVariable {
                name: "salesBookData",
                ..
            }
        ));
    }

    #[test]
    fn test_unsupported_format() {
        let err = load_ledger::<SalesRecord>(Path::new("sales.xlsx")).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_data_quality() {
        let ledgers = Ledgers {
            orders: vec![
                OrderRecord::default(),
                OrderRecord {
                    sku: "A".into(),
                    date: "2025-12-01".into(),
                    value: Some(1.0),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        let q = data_quality(&ledgers);
        assert_eq!(q.orders_without_date, 1);
        assert_eq!(q.orders_without_sku, 1);
        assert_eq!(q.orders_without_value, 1);
        assert_eq!(q.sales_without_date, 0);
    }
}
