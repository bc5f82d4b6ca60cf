//! Dashboard view transitions.
//!
//! The presentation layer owns persistence of [`DashboardState`]; the engine
//! only maps (state, event) to the next state.

use contracts::shared::view_state::{DashboardState, ViewEvent, ViewMode};

pub fn transition(state: DashboardState, event: ViewEvent) -> DashboardState {
    match event {
        ViewEvent::SelectSku { sku } if !sku.is_empty() => DashboardState {
            current_view: ViewMode::Sku,
            selected_sku: Some(sku),
        },
        ViewEvent::SelectSku { .. } => state,
        // the last SKU is remembered, only the view goes back
        ViewEvent::ClearSelection => DashboardState {
            current_view: ViewMode::AllSkus,
            ..state
        },
        ViewEvent::Reload => DashboardState::default(),
    }
}

/// SKU whose trend should be shown when a stored state is restored.
/// The all-SKU trend is always shown; this is the extra single-SKU view.
pub fn restored_sku(state: &DashboardState) -> Option<&str> {
    match state.current_view {
        ViewMode::Sku => state.selected_sku.as_deref().filter(|s| !s.is_empty()),
        ViewMode::AllSkus => None,
    }
}
