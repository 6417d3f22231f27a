//! Add-integration menu
//!
//! Dropdown under the Add button listing the integration catalog.
//! Selecting a non-disabled entry reports the selection and closes the
//! menu; disabled entries are shown but inert.

use linkdock_core::{catalog, Integration};
use linkdock_host::{ElementId, Rect, Stage};
use linkdock_ui::dropdown::{AnchorToggle, Dropdown, DropdownState};
use log::debug;

/// Menu panel width
const MENU_WIDTH: f32 = 240.0;
/// Height of the "Integration" label row
const LABEL_HEIGHT: f32 = 28.0;
/// Height of one catalog entry
const ITEM_HEIGHT: f32 = 36.0;

struct MenuEntry {
    integration: Integration,
    element: ElementId,
}

/// The catalog menu for one Add button
pub struct IntegrationMenu {
    anchor: ElementId,
    panel: ElementId,
    entries: Vec<MenuEntry>,
    dropdown: Dropdown,
    state: DropdownState,
    anchor_toggle: AnchorToggle,
}

impl IntegrationMenu {
    /// Mount a closed menu anchored under `anchor`
    pub fn new(stage: &Stage, anchor: ElementId) -> Self {
        let items = catalog();
        let height = LABEL_HEIGHT + items.len() as f32 * ITEM_HEIGHT;
        let panel = stage.insert(None, Rect::new(0.0, 0.0, MENU_WIDTH, height));

        let entries = items
            .into_iter()
            .enumerate()
            .map(|(index, integration)| MenuEntry {
                element: stage.insert(
                    Some(panel),
                    Rect::new(
                        0.0,
                        LABEL_HEIGHT + index as f32 * ITEM_HEIGHT,
                        MENU_WIDTH,
                        ITEM_HEIGHT,
                    ),
                ),
                integration,
            })
            .collect();

        Self {
            anchor,
            panel,
            entries,
            dropdown: Dropdown::new(anchor, panel),
            state: DropdownState::default(),
            anchor_toggle: AnchorToggle::default(),
        }
    }

    pub fn panel(&self) -> ElementId {
        self.panel
    }

    pub fn is_open(&self) -> bool {
        self.state.open
    }

    /// The stage element for a catalog entry, for routing interactions
    pub fn entry_element(&self, id: u32) -> Option<ElementId> {
        self.entries
            .iter()
            .find(|entry| entry.integration.id == id)
            .map(|entry| entry.element)
    }

    /// Flip open/closed from a trigger interaction on the anchor
    pub fn toggle(&mut self, stage: &Stage) {
        self.anchor_toggle.toggle(stage, self.anchor, &mut self.state);
        self.dropdown.sync(stage, &self.state);
    }

    /// Close without a selection
    pub fn close(&mut self, stage: &Stage) {
        self.state.open = false;
        self.dropdown.sync(stage, &self.state);
    }

    /// Select a catalog entry by id.
    ///
    /// Returns the integration and closes the menu. Disabled and unknown
    /// entries return `None` and leave the menu open.
    pub fn select(&mut self, stage: &Stage, id: u32) -> Option<Integration> {
        let entry = self.entries.iter().find(|entry| entry.integration.id == id)?;
        if entry.integration.disabled {
            debug!("ignoring selection of disabled integration {id}");
            return None;
        }
        let integration = entry.integration.clone();
        self.close(stage);
        Some(integration)
    }

    /// Select whichever entry owns `element`
    pub fn select_at(&mut self, stage: &Stage, element: ElementId) -> Option<Integration> {
        let id = self
            .entries
            .iter()
            .find(|entry| entry.element == element)?
            .integration
            .id;
        self.select(stage, id)
    }

    /// Drain dismissal requests and apply state to the stage
    pub fn update(&mut self, stage: &Stage) {
        if self.dropdown.take_close_request() {
            self.state.open = false;
        }
        self.dropdown.sync(stage, &self.state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkdock_ui::dropdown::DEFAULT_ARM_DELAY;

    fn fixture() -> (Stage, ElementId, IntegrationMenu) {
        let stage = Stage::new();
        let anchor = stage.insert(None, Rect::new(100.0, 40.0, 60.0, 28.0));
        let menu = IntegrationMenu::new(&stage, anchor);
        (stage, anchor, menu)
    }

    #[test]
    fn test_toggle_opens_under_anchor_left_edge() {
        let (stage, _, mut menu) = fixture();

        menu.toggle(&stage);
        assert!(menu.is_open());

        let panel = stage.page_rect(menu.panel()).unwrap();
        assert_eq!(panel.x, 100.0);
        // anchor bottom (68) + default 0.13 rem gap
        assert!((panel.y - (68.0 + 0.13 * 16.0)).abs() < 1e-4);
    }

    #[test]
    fn test_select_reports_and_closes() {
        let (stage, _, mut menu) = fixture();
        menu.toggle(&stage);

        let selected = menu.select(&stage, 3).unwrap();
        assert_eq!(selected.title, "Linear ticket");
        assert!(!menu.is_open());
    }

    #[test]
    fn test_disabled_entry_is_inert() {
        let (stage, _, mut menu) = fixture();
        menu.toggle(&stage);

        // Catalog id 4 is the disabled Miro board
        assert!(menu.select(&stage, 4).is_none());
        assert!(menu.is_open());
    }

    #[test]
    fn test_select_at_routes_by_element() {
        let (stage, _, mut menu) = fixture();
        menu.toggle(&stage);

        let element = menu.entry_element(5).unwrap();
        let selected = menu.select_at(&stage, element).unwrap();
        assert_eq!(selected.title, "Notion page");
    }

    #[test]
    fn test_outside_interaction_dismisses() {
        let (stage, _, mut menu) = fixture();
        let outside = stage.insert(None, Rect::new(600.0, 600.0, 10.0, 10.0));

        menu.toggle(&stage);
        menu.update(&stage);
        stage.advance(DEFAULT_ARM_DELAY);

        stage.dispatch_pointer(Some(outside));
        menu.update(&stage);

        assert!(!menu.is_open());
        assert_eq!(stage.active_listener_count(), 0);
    }

    #[test]
    fn test_interaction_on_entry_does_not_dismiss() {
        let (stage, _, mut menu) = fixture();

        menu.toggle(&stage);
        menu.update(&stage);
        stage.advance(DEFAULT_ARM_DELAY);

        let element = menu.entry_element(1).unwrap();
        stage.dispatch_pointer(Some(element));
        menu.update(&stage);

        assert!(menu.is_open());
    }
}
