//! Hover menu (options tray) state model.
//!
//! The debounce scheduling lives in the application layer; this module only
//! defines the observable state the host UI renders from.

use serde::{Deserialize, Serialize};

/// Where the tray phase currently stands.
///
/// `ClosingDelay` is observable so hosts can, for example, fade the tray
/// out while the close timer runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuPhase {
    Closed,
    Open,
    ClosingDelay,
}

/// Screen position the tray is anchored at, in host coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TrayPosition {
    pub x: f32,
    pub y: f32,
}

/// The single shared tray state across all hover anchors.
///
/// Invariant: `anchor_id` is `Some` exactly when the phase is not `Closed`,
/// and at most one anchor is ever open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoverMenuState {
    pub phase: MenuPhase,
    pub anchor_id: Option<String>,
    pub position: TrayPosition,
}

impl Default for HoverMenuState {
    fn default() -> Self {
        Self::closed()
    }
}

impl HoverMenuState {
    /// The closed state: no anchor, default position.
    pub fn closed() -> Self {
        Self {
            phase: MenuPhase::Closed,
            anchor_id: None,
            position: TrayPosition::default(),
        }
    }

    /// An open state anchored at `anchor_id`.
    pub fn open(anchor_id: impl Into<String>, position: TrayPosition) -> Self {
        Self {
            phase: MenuPhase::Open,
            anchor_id: Some(anchor_id.into()),
            position,
        }
    }

    /// Whether the tray is visible (open or in its close delay window).
    pub fn is_visible(&self) -> bool {
        self.phase != MenuPhase::Closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_state_has_no_anchor() {
        let state = HoverMenuState::closed();
        assert_eq!(state.phase, MenuPhase::Closed);
        assert!(state.anchor_id.is_none());
        assert!(!state.is_visible());
    }

    #[test]
    fn test_open_state_is_visible() {
        let state = HoverMenuState::open("post-card-3", TrayPosition { x: 10.0, y: 24.0 });
        assert!(state.is_visible());
        assert_eq!(state.anchor_id.as_deref(), Some("post-card-3"));
    }
}
