use serde::{Deserialize, Serialize};

/// Storage key the presentation layer persists `DashboardState` under
pub const DASHBOARD_STATE_KEY: &str = "jainyticDashboard";

/// Which dispatch trend the SKU card shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewMode {
    #[default]
    AllSkus,
    Sku,
}

/// Last-viewed dashboard selection.
///
/// Serialized form matches what the presentation layer keeps in its
/// key-value store: `{"currentView":"sku","selectedSku":"..."}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardState {
    #[serde(default)]
    pub current_view: ViewMode,
    #[serde(default)]
    pub selected_sku: Option<String>,
}

/// User interaction that changes the view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViewEvent {
    /// SKU picked from the summary drill-down
    SelectSku { sku: String },
    /// "Clear" button, back to the all-SKU trend
    ClearSelection,
    /// Hard page reload
    Reload,
}
