//! Open/close toggling from an anchor element
//!
//! Thin wiring between an anchor's live geometry and the placement rules:
//! on a trigger interaction it reads the anchor's current bounds, converts
//! them to page coordinates, and flips the dropdown state.

use linkdock_host::{ElementId, Stage};
use log::debug;

use super::position::{Placement, PlacementKind, DEFAULT_TOP_OFFSET_REM};
use super::{DropdownState, PanelPosition};

/// Per-call-site toggle configuration.
///
/// The placement kind and vertical gap are chosen once when the toggle is
/// created, not per invocation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorToggle {
    pub placement: PlacementKind,
    pub top_offset_rem: f32,
}

impl Default for AnchorToggle {
    fn default() -> Self {
        Self {
            placement: PlacementKind::Left,
            top_offset_rem: DEFAULT_TOP_OFFSET_REM,
        }
    }
}

impl AnchorToggle {
    /// Create a toggle with an explicit placement kind and vertical gap
    pub fn new(placement: PlacementKind, top_offset_rem: f32) -> Self {
        Self {
            placement,
            top_offset_rem,
        }
    }

    /// Flip the dropdown state from a trigger interaction on `anchor`.
    ///
    /// Closing never recomputes the position. Opening reads the anchor's
    /// current viewport rectangle, converts the reference point (left
    /// edge, bottom edge) to page coordinates by adding the scroll
    /// offsets, and stores a freshly built position; positions are never
    /// reused across opens. A not-yet-mounted anchor leaves the state
    /// untouched.
    pub fn toggle(&self, stage: &Stage, anchor: ElementId, state: &mut DropdownState) {
        if state.open {
            state.open = false;
            return;
        }

        let Some(bounds) = stage.bounding_rect(anchor) else {
            debug!("toggle skipped, anchor not mounted");
            return;
        };

        // The panel is positioned in page coordinates so it stays put if
        // the page scrolls after opening.
        let (scroll_x, scroll_y) = stage.scroll_offset();
        let top = bounds.bottom() + scroll_y;
        let left = bounds.x + scroll_x;

        let placement = match self.placement {
            PlacementKind::Left => Placement::Left { top, left },
            PlacementKind::Middle => Placement::Middle {
                top,
                left,
                anchor: bounds,
            },
            PlacementKind::Right => Placement::Right {
                top,
                left,
                anchor: bounds,
            },
        };

        state.position = Some(PanelPosition {
            placement,
            top_offset_rem: self.top_offset_rem,
        });
        state.open = true;
    }
}
