//! Integration input
//!
//! The whole add-a-link flow wired together: an Add button opening the
//! catalog menu, a link input panel opening once an integration is picked,
//! and the list of added integrations underneath. Records enter the list
//! resolving; a demo backend stands in for the real resolver.

use linkdock_core::{AddedIntegration, Integration};
use linkdock_host::{ElementId, Rect, Stage};
use linkdock_ui::button::{Button, ButtonIcon, ButtonSize};
use linkdock_ui::text_field::{Key, TextFieldEvent};
use log::info;

use crate::integration_list::IntegrationList;
use crate::integration_menu::IntegrationMenu;
use crate::link_input::LinkInput;

/// Host the demo backend refuses to resolve
pub const DEMO_BAD_HOST: &str = "invalid.com";

/// Metadata the demo backend resolves every other link to
const PLACEHOLDER_TITLE: &str = "DSN-556";
const PLACEHOLDER_SUBTITLE: &str = "Design Spec";

const ROOT_RECT: Rect = Rect {
    x: 20.0,
    y: 20.0,
    width: 360.0,
    height: 480.0,
};
const ADD_RECT: Rect = Rect {
    x: 20.0,
    y: 28.0,
    width: 140.0,
    height: 32.0,
};
const MORE_RECT: Rect = Rect {
    x: 168.0,
    y: 32.0,
    width: 24.0,
    height: 24.0,
};

/// The integration input feature, mounted on a stage
pub struct IntegrationInput {
    root: ElementId,
    add_button: Button,
    more_button: Button,
    menu: IntegrationMenu,
    link_input: LinkInput,
    list: IntegrationList,
    selected: Option<Integration>,
}

impl IntegrationInput {
    /// Mount the feature at the top of the stage
    pub fn new(stage: &Stage) -> Self {
        let root = stage.insert(None, ROOT_RECT);
        let add_button = Button::new(stage, Some(root), ADD_RECT)
            .with_label("Add integration")
            .with_icon(ButtonIcon::Add);
        let more_button = Button::new(stage, Some(root), MORE_RECT)
            .with_icon(ButtonIcon::Dots)
            .with_size(ButtonSize::Tiny);

        Self {
            menu: IntegrationMenu::new(stage, add_button.element()),
            link_input: LinkInput::new(stage, more_button.element()),
            list: IntegrationList::new(stage, Some(root), (20.0, 80.0)),
            root,
            add_button,
            more_button,
            selected: None,
        }
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    pub fn add_button(&self) -> &Button {
        &self.add_button
    }

    pub fn more_button(&self) -> &Button {
        &self.more_button
    }

    pub fn menu(&self) -> &IntegrationMenu {
        &self.menu
    }

    pub fn link_input(&self) -> &LinkInput {
        &self.link_input
    }

    pub fn list(&self) -> &IntegrationList {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut IntegrationList {
        &mut self.list
    }

    pub fn selected(&self) -> Option<&Integration> {
        self.selected.as_ref()
    }

    /// Press the Add button, flipping the catalog menu
    pub fn press_add(&mut self, stage: &Stage) {
        if self.add_button.press() {
            self.menu.toggle(stage);
        }
    }

    /// Pick an integration from the open menu.
    ///
    /// The menu closes and the link input opens, titled after the pick.
    /// Disabled entries leave everything as it was.
    pub fn select_integration(&mut self, stage: &Stage, id: u32) -> bool {
        let Some(integration) = self.menu.select(stage, id) else {
            return false;
        };
        info!("selected integration {}", integration.title);
        self.link_input.set_title(integration.title.clone());
        self.selected = Some(integration);
        if !self.link_input.is_open() {
            self.link_input.toggle(stage);
        }
        true
    }

    /// Feed a key press to the link input; Enter submits
    pub fn type_key(&mut self, stage: &Stage, key: Key) {
        if self.link_input.input(key) == Some(TextFieldEvent::Submitted) {
            self.submit(stage);
        }
    }

    /// Submit the entered link.
    ///
    /// A valid link becomes a resolving record in the list and clears the
    /// selection; an invalid one keeps the panel open with the field
    /// marked. Returns whether a record was added.
    pub fn submit(&mut self, stage: &Stage) -> bool {
        let Some(integration) = self.selected.clone() else {
            return false;
        };
        let Some(url) = self.link_input.submit(stage) else {
            return false;
        };
        self.selected = None;
        self.list
            .push(stage, AddedIntegration::new(integration, url));
        true
    }

    /// Demo backend: settle every resolving record.
    ///
    /// Links on the known-bad host error out; everything else resolves to
    /// the placeholder ticket. Errored rows are rebuilt so the update menu
    /// re-anchors on the link.
    pub fn resolve_pending(&mut self, stage: &Stage) {
        let mut errored = Vec::new();
        for (index, item) in self.list.items_mut().enumerate() {
            if !item.record().is_resolving() {
                continue;
            }
            if item.record().link.host_str() == Some(DEMO_BAD_HOST) {
                errored.push(index);
            } else {
                item.resolve(PLACEHOLDER_TITLE, PLACEHOLDER_SUBTITLE);
            }
        }
        // Rebuild error rows back-to-front so indices stay valid
        for index in errored.into_iter().rev() {
            if let Some(mut record) = self.list.apply_action(
                stage,
                index,
                crate::update_menu::UpdateAction::Delete,
            ) {
                record.mark_error();
                self.list.push(stage, record);
            }
        }
    }

    /// Drain dismissal requests across every dropdown
    pub fn update(&mut self, stage: &Stage) {
        self.menu.update(stage);
        self.link_input.update(stage);
        self.list.update(stage);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkdock_ui::dropdown::DEFAULT_ARM_DELAY;
    use linkdock_ui::text_field::FieldVariant;

    fn fixture() -> (Stage, IntegrationInput) {
        let stage = Stage::new();
        let input = IntegrationInput::new(&stage);
        (stage, input)
    }

    fn type_value(stage: &Stage, input: &mut IntegrationInput, value: &str) {
        for c in value.chars() {
            input.type_key(stage, Key::Char(c));
        }
    }

    fn add_link(stage: &Stage, input: &mut IntegrationInput, link: &str) {
        input.press_add(stage);
        input.select_integration(stage, 3);
        type_value(stage, input, link);
        assert!(input.submit(stage));
    }

    #[test]
    fn test_add_button_opens_menu() {
        let (stage, mut input) = fixture();

        input.press_add(&stage);
        assert!(input.menu().is_open());

        input.press_add(&stage);
        assert!(!input.menu().is_open());
    }

    #[test]
    fn test_selecting_integration_opens_titled_link_input() {
        let (stage, mut input) = fixture();
        input.press_add(&stage);

        assert!(input.select_integration(&stage, 3));

        assert!(!input.menu().is_open());
        assert!(input.link_input().is_open());
        assert_eq!(input.link_input().title(), "Linear ticket");
        assert_eq!(input.selected().unwrap().id, 3);
    }

    #[test]
    fn test_disabled_integration_changes_nothing() {
        let (stage, mut input) = fixture();
        input.press_add(&stage);

        assert!(!input.select_integration(&stage, 4));

        assert!(input.menu().is_open());
        assert!(!input.link_input().is_open());
        assert!(input.selected().is_none());
    }

    #[test]
    fn test_interaction_right_after_open_does_not_dismiss() {
        let (stage, mut input) = fixture();
        let outside = stage.insert(None, Rect::new(700.0, 700.0, 5.0, 5.0));

        input.press_add(&stage);
        input.select_integration(&stage, 3);

        // The very interaction that opened the panel arrives before the
        // listener arms, so the panel survives it
        stage.dispatch_pointer(Some(outside));
        input.update(&stage);
        assert!(input.link_input().is_open());

        // Once armed, an outside interaction dismisses
        stage.advance(DEFAULT_ARM_DELAY);
        stage.dispatch_pointer(Some(outside));
        input.update(&stage);
        assert!(!input.link_input().is_open());
    }

    #[test]
    fn test_valid_link_becomes_resolving_record() {
        let (stage, mut input) = fixture();

        add_link(&stage, &mut input, "https://linear.app/team/DSN-556");

        assert_eq!(input.list().len(), 1);
        let item = &input.list().items()[0];
        assert!(item.shows_progress_tag());
        assert_eq!(item.record().integration.id, 3);
        assert!(!input.link_input().is_open());
        assert!(input.selected().is_none());
    }

    #[test]
    fn test_resolve_pending_fills_placeholder_metadata() {
        let (stage, mut input) = fixture();
        add_link(&stage, &mut input, "https://linear.app/team/DSN-556");

        input.resolve_pending(&stage);

        let item = &input.list().items()[0];
        assert!(!item.shows_progress_tag());
        assert_eq!(item.display_text(), "DSN-556");
        assert_eq!(
            item.record().resolved_subtitle.as_deref(),
            Some("Design Spec")
        );
    }

    #[test]
    fn test_bad_host_errors_out() {
        let (stage, mut input) = fixture();
        add_link(&stage, &mut input, "https://invalid.com/whatever");

        input.resolve_pending(&stage);

        let item = &input.list().items()[0];
        assert!(item.record().has_error());
        assert_eq!(item.display_text(), "URL not recognized");
    }

    #[test]
    fn test_invalid_link_keeps_panel_open_and_marked() {
        let (stage, mut input) = fixture();
        input.press_add(&stage);
        input.select_integration(&stage, 3);
        type_value(&stage, &mut input, "not a url");

        assert!(!input.submit(&stage));

        assert!(input.link_input().is_open());
        assert_eq!(input.link_input().field().variant(), FieldVariant::Danger);
        assert!(input.selected().is_some());
        assert!(input.list().is_empty());
    }

    #[test]
    fn test_enter_submits() {
        let (stage, mut input) = fixture();
        input.press_add(&stage);
        input.select_integration(&stage, 5);
        type_value(&stage, &mut input, "https://notion.so/page");

        input.type_key(&stage, Key::Enter);

        assert_eq!(input.list().len(), 1);
        assert!(!input.link_input().is_open());
    }

    #[test]
    fn test_submit_without_selection_is_inert() {
        let (stage, mut input) = fixture();

        assert!(!input.submit(&stage));
        assert!(input.list().is_empty());
    }

    #[test]
    fn test_full_flow_then_delete() {
        let (stage, mut input) = fixture();
        add_link(&stage, &mut input, "https://linear.app/team/DSN-556");
        input.resolve_pending(&stage);

        let item = input.list_mut().item_mut(0).unwrap();
        item.toggle_menu(&stage);
        stage.advance(DEFAULT_ARM_DELAY);
        let delete = item
            .menu()
            .action_element(crate::update_menu::UpdateAction::Delete);
        let action = item.select_menu_at(&stage, delete).unwrap();

        input.list_mut().apply_action(&stage, 0, action);

        assert!(input.list().is_empty());
        assert_eq!(stage.active_listener_count(), 0);
    }
}
