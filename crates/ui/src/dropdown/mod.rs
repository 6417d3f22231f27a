//! Positioned dropdown system
//!
//! A dropdown is a floating panel pinned under an anchor element:
//! - [`position`]: pure placement arithmetic (left/middle/right alignment)
//! - [`dismiss`]: outside-interaction dismissal with delayed arming
//! - [`toggle`]: anchor-driven open/close wiring
//! - [`Dropdown`]: the mountable lifecycle tying the three together
//!
//! The open flag and position live with the component that renders the
//! anchor, not with the dropdown itself. The dropdown applies that state to
//! the stage and signals closes rather than performing them.

mod dismiss;
mod position;
mod toggle;

pub use dismiss::{CloseSignal, DismissalController, DEFAULT_ARM_DELAY};
pub use position::{resolve, Placement, PlacementKind, DEFAULT_TOP_OFFSET_REM};
pub use toggle::AnchorToggle;

use linkdock_host::{ElementId, Stage};
use log::debug;
use std::time::Duration;

/// A stored panel position: the alignment rule plus the vertical gap that
/// travels with it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelPosition {
    pub placement: Placement,
    pub top_offset_rem: f32,
}

/// Open/closed state of one dropdown.
///
/// Owned by the component that renders the anchor. Mutated via an
/// [`AnchorToggle`] on trigger interactions and flipped closed by the owner
/// when the dropdown signals a close request.
#[derive(Debug, Clone, Copy, Default)]
pub struct DropdownState {
    pub open: bool,
    pub position: Option<PanelPosition>,
}

/// Mountable dropdown lifecycle for an anchor/panel pair.
///
/// The panel element is created by the caller and may hold arbitrary
/// content; the dropdown only moves it and manages dismissal. Call
/// [`Dropdown::sync`] after every state change (and after draining
/// [`Dropdown::take_close_request`]) to apply the owner's state to the
/// stage.
pub struct Dropdown {
    anchor: ElementId,
    panel: ElementId,
    dismiss: DismissalController,
    close_signal: CloseSignal,
    open: bool,
    applied: Option<PanelPosition>,
}

impl Dropdown {
    /// Create a dropdown with the default arm delay
    pub fn new(anchor: ElementId, panel: ElementId) -> Self {
        Self::with_arm_delay(anchor, panel, DEFAULT_ARM_DELAY)
    }

    /// Create a dropdown with an explicit dismissal arm delay
    pub fn with_arm_delay(anchor: ElementId, panel: ElementId, arm_delay: Duration) -> Self {
        let close_signal = CloseSignal::new();
        let dismiss = DismissalController::new(anchor, panel, arm_delay, {
            let signal = close_signal.clone();
            move || signal.request()
        });
        Self {
            anchor,
            panel,
            dismiss,
            close_signal,
            open: false,
            applied: None,
        }
    }

    /// The anchor element this dropdown hangs under
    pub fn anchor(&self) -> ElementId {
        self.anchor
    }

    /// The floating panel element
    pub fn panel(&self) -> ElementId {
        self.panel
    }

    /// Whether the last synced state was open
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Drain a pending outside-interaction close request.
    ///
    /// The owner is expected to flip its open flag when this returns true
    /// and then sync again.
    pub fn take_close_request(&self) -> bool {
        self.close_signal.take()
    }

    /// Apply the owner's state to the stage.
    ///
    /// While open, places the panel according to the stored position,
    /// measuring the panel's own rendered width live. Open-flag transitions
    /// arm or disarm the dismissal controller.
    pub fn sync(&mut self, stage: &Stage, state: &DropdownState) {
        if state.open {
            self.apply_position(stage, state.position);
        }
        if state.open != self.open {
            self.open = state.open;
            if !state.open {
                self.applied = None;
            }
            self.dismiss.set_open(stage, state.open);
        }
    }

    fn apply_position(&mut self, stage: &Stage, position: Option<PanelPosition>) {
        let Some(position) = position else {
            return;
        };
        // Re-resolving is only needed when the stored position changed
        if self.applied == Some(position) {
            return;
        }
        let Some(panel_rect) = stage.bounding_rect(self.panel) else {
            debug!("placement skipped, panel not mounted");
            return;
        };
        let resolved = position::resolve(
            position.placement,
            position.top_offset_rem,
            stage.root_font_size(),
            panel_rect.width,
        );
        stage.move_to(self.panel, resolved);
        self.applied = Some(position);
    }
}
