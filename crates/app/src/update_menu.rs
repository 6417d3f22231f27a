//! Per-item update menu
//!
//! Right-aligned dropdown on an added-integration row offering the update
//! actions: change the URL or delete the integration. The menu only
//! reports which action was picked; the list owns the consequences.

use linkdock_host::{ElementId, Rect, Stage};
use linkdock_ui::button::ButtonIcon;
use linkdock_ui::dropdown::{AnchorToggle, Dropdown, DropdownState, PlacementKind};

const MENU_WIDTH: f32 = 200.0;
const LABEL_HEIGHT: f32 = 28.0;
const ITEM_HEIGHT: f32 = 36.0;

/// An action offered by the update menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateAction {
    ChangeUrl,
    Delete,
}

impl UpdateAction {
    /// Title displayed in the menu
    pub fn title(&self) -> &'static str {
        match self {
            Self::ChangeUrl => "Change URL",
            Self::Delete => "Delete integration",
        }
    }

    /// Icon displayed next to the title
    pub fn icon(&self) -> ButtonIcon {
        match self {
            Self::ChangeUrl => ButtonIcon::Refresh,
            Self::Delete => ButtonIcon::Trash,
        }
    }

    /// Destructive actions render in the danger style
    pub fn is_destructive(&self) -> bool {
        matches!(self, Self::Delete)
    }
}

const ACTIONS: [UpdateAction; 2] = [UpdateAction::ChangeUrl, UpdateAction::Delete];

/// The update menu for one added-integration row
pub struct UpdateMenu {
    anchor: ElementId,
    panel: ElementId,
    action_elements: [ElementId; 2],
    dropdown: Dropdown,
    state: DropdownState,
    anchor_toggle: AnchorToggle,
    label: String,
}

impl UpdateMenu {
    /// Mount a closed menu whose right edge aligns with `anchor`
    pub fn new(stage: &Stage, anchor: ElementId, label: impl Into<String>) -> Self {
        let height = LABEL_HEIGHT + ACTIONS.len() as f32 * ITEM_HEIGHT;
        let panel = stage.insert(None, Rect::new(0.0, 0.0, MENU_WIDTH, height));
        let action_elements = [0, 1].map(|index| {
            stage.insert(
                Some(panel),
                Rect::new(
                    0.0,
                    LABEL_HEIGHT + index as f32 * ITEM_HEIGHT,
                    MENU_WIDTH,
                    ITEM_HEIGHT,
                ),
            )
        });

        Self {
            anchor,
            panel,
            action_elements,
            dropdown: Dropdown::new(anchor, panel),
            state: DropdownState::default(),
            anchor_toggle: AnchorToggle {
                placement: PlacementKind::Right,
                ..AnchorToggle::default()
            },
            label: label.into(),
        }
    }

    pub fn panel(&self) -> ElementId {
        self.panel
    }

    /// Short label shown above the actions, e.g. "Linear"
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_open(&self) -> bool {
        self.state.open
    }

    /// The stage element for an action, for routing interactions
    pub fn action_element(&self, action: UpdateAction) -> ElementId {
        let index = ACTIONS
            .iter()
            .position(|candidate| *candidate == action)
            .unwrap_or_default();
        self.action_elements[index]
    }

    /// Flip open/closed from a trigger interaction on the anchor
    pub fn toggle(&mut self, stage: &Stage) {
        self.anchor_toggle.toggle(stage, self.anchor, &mut self.state);
        self.dropdown.sync(stage, &self.state);
    }

    /// Pick whichever action owns `element`, closing the menu
    pub fn select_at(&mut self, stage: &Stage, element: ElementId) -> Option<UpdateAction> {
        let index = self
            .action_elements
            .iter()
            .position(|candidate| *candidate == element)?;
        self.state.open = false;
        self.dropdown.sync(stage, &self.state);
        Some(ACTIONS[index])
    }

    /// Drain dismissal requests and apply state to the stage
    pub fn update(&mut self, stage: &Stage) {
        if self.dropdown.take_close_request() {
            self.state.open = false;
        }
        self.dropdown.sync(stage, &self.state);
    }

    /// Unmount the menu's panel
    pub fn unmount(self, stage: &Stage) {
        stage.remove(self.panel);
    }
}
