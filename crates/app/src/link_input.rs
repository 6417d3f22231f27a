//! Link input panel
//!
//! Dropdown panel with a text field and a submit button, centered under
//! its anchor. Validates the entered link before handing it to the caller;
//! an invalid entry flips the field to the danger variant until it is
//! edited again.

use linkdock_core::{parse_link, Url};
use linkdock_host::{ElementId, Rect, Stage};
use linkdock_ui::button::Button;
use linkdock_ui::dropdown::{
    AnchorToggle, Dropdown, DropdownState, PlacementKind, DEFAULT_TOP_OFFSET_REM,
};
use linkdock_ui::text_field::{FieldVariant, Key, TextField, TextFieldEvent};
use log::warn;

/// Height of the panel's upward-pointing arrow, in rems.
///
/// The panel's vertical gap is the arrow height plus the standard design
/// gap, so the arrow tip touches the anchor.
pub const ARROW_HEIGHT_REM: f32 = 0.4375;

const PANEL_WIDTH: f32 = 280.0;
const PANEL_HEIGHT: f32 = 96.0;
const FIELD_RECT: Rect = Rect {
    x: 12.0,
    y: 48.0,
    width: 188.0,
    height: 32.0,
};
const SUBMIT_RECT: Rect = Rect {
    x: 208.0,
    y: 48.0,
    width: 60.0,
    height: 32.0,
};

/// The link entry panel for one anchor
pub struct LinkInput {
    anchor: ElementId,
    panel: ElementId,
    field: TextField,
    submit: Button,
    dropdown: Dropdown,
    state: DropdownState,
    anchor_toggle: AnchorToggle,
    title: String,
    invalid_value: Option<String>,
}

impl LinkInput {
    /// Mount a closed link input centered under `anchor`
    pub fn new(stage: &Stage, anchor: ElementId) -> Self {
        let panel = stage.insert(None, Rect::new(0.0, 0.0, PANEL_WIDTH, PANEL_HEIGHT));
        let field = TextField::new(stage, Some(panel), FIELD_RECT)
            .with_placeholder("Paste link https://...");
        let mut submit = Button::new(stage, Some(panel), SUBMIT_RECT).with_label("Link");
        submit.set_disabled(true);

        Self {
            anchor,
            panel,
            field,
            submit,
            dropdown: Dropdown::new(anchor, panel),
            state: DropdownState::default(),
            anchor_toggle: AnchorToggle::new(
                PlacementKind::Middle,
                ARROW_HEIGHT_REM + DEFAULT_TOP_OFFSET_REM,
            ),
            title: String::new(),
            invalid_value: None,
        }
    }

    pub fn panel(&self) -> ElementId {
        self.panel
    }

    pub fn is_open(&self) -> bool {
        self.state.open
    }

    /// Title shown on the panel, e.g. "Linear ticket"
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn field(&self) -> &TextField {
        &self.field
    }

    pub fn submit_button(&self) -> &Button {
        &self.submit
    }

    /// Flip open/closed from a trigger interaction on the anchor.
    ///
    /// Opening puts the field in focus.
    pub fn toggle(&mut self, stage: &Stage) {
        self.anchor_toggle.toggle(stage, self.anchor, &mut self.state);
        if self.state.open {
            self.field.focus();
        } else {
            self.field.blur();
        }
        self.dropdown.sync(stage, &self.state);
    }

    /// Close the panel
    pub fn close(&mut self, stage: &Stage) {
        self.state.open = false;
        self.field.blur();
        self.dropdown.sync(stage, &self.state);
    }

    /// Feed a key press to the field. Returns the field's event so the
    /// caller can submit on Enter.
    pub fn input(&mut self, key: Key) -> Option<TextFieldEvent> {
        let event = self.field.handle_key(key);
        self.refresh();
        event
    }

    /// Validate and take the entered link.
    ///
    /// A valid link clears the field, closes the panel and is returned. An
    /// invalid one marks the field until it is edited and keeps the panel
    /// open.
    pub fn submit(&mut self, stage: &Stage) -> Option<Url> {
        if self.field.is_empty() {
            return None;
        }
        match parse_link(self.field.value()) {
            Ok(url) => {
                self.field.clear();
                self.invalid_value = None;
                self.refresh();
                self.close(stage);
                Some(url)
            }
            Err(error) => {
                warn!("rejected link: {error}");
                self.invalid_value = Some(self.field.value().to_string());
                self.refresh();
                None
            }
        }
    }

    /// Drain dismissal requests and apply state to the stage
    pub fn update(&mut self, stage: &Stage) {
        if self.dropdown.take_close_request() {
            self.state.open = false;
            self.field.blur();
        }
        self.dropdown.sync(stage, &self.state);
    }

    /// The danger mark sticks to the exact rejected value
    fn refresh(&mut self) {
        self.submit.set_disabled(self.field.is_empty());
        let invalid = self.invalid_value.as_deref() == Some(self.field.value());
        self.field.set_variant(if invalid {
            FieldVariant::Danger
        } else {
            FieldVariant::Default
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkdock_ui::dropdown::DEFAULT_ARM_DELAY;

    fn fixture() -> (Stage, LinkInput) {
        let stage = Stage::new();
        let anchor = stage.insert(None, Rect::new(200.0, 100.0, 40.0, 20.0));
        let input = LinkInput::new(&stage, anchor);
        (stage, input)
    }

    fn type_value(input: &mut LinkInput, value: &str) {
        for c in value.chars() {
            input.input(Key::Char(c));
        }
    }

    #[test]
    fn test_open_centers_panel_and_focuses_field() {
        let (stage, mut input) = fixture();

        input.toggle(&stage);

        assert!(input.is_open());
        assert!(input.field().is_focused());

        let panel = stage.page_rect(input.panel()).unwrap();
        // anchor center 220 - panel_width/2
        assert_eq!(panel.x, 220.0 - PANEL_WIDTH / 2.0);
        // anchor bottom 120 + (0.4375 + 0.13) rem
        assert!((panel.y - (120.0 + (ARROW_HEIGHT_REM + DEFAULT_TOP_OFFSET_REM) * 16.0)).abs() < 1e-3);
    }

    #[test]
    fn test_submit_disabled_until_text_entered() {
        let (stage, mut input) = fixture();
        input.toggle(&stage);

        assert!(input.submit_button().is_disabled());
        assert_eq!(input.submit(&stage), None);

        type_value(&mut input, "h");
        assert!(!input.submit_button().is_disabled());
    }

    #[test]
    fn test_valid_link_submits_clears_and_closes() {
        let (stage, mut input) = fixture();
        input.toggle(&stage);
        type_value(&mut input, "https://linear.app/team/DSN-556");

        let url = input.submit(&stage).unwrap();

        assert_eq!(url.as_str(), "https://linear.app/team/DSN-556");
        assert!(input.field().is_empty());
        assert!(!input.is_open());
    }

    #[test]
    fn test_invalid_link_marks_field_until_edited() {
        let (stage, mut input) = fixture();
        input.toggle(&stage);
        type_value(&mut input, "not a url");

        assert_eq!(input.submit(&stage), None);
        assert!(input.is_open());
        assert_eq!(input.field().variant(), FieldVariant::Danger);

        // Editing the value lifts the mark
        input.input(Key::Char('x'));
        assert_eq!(input.field().variant(), FieldVariant::Default);

        // Restoring the rejected value brings it back
        input.input(Key::Backspace);
        assert_eq!(input.field().variant(), FieldVariant::Danger);
    }

    #[test]
    fn test_unsupported_scheme_is_rejected() {
        let (stage, mut input) = fixture();
        input.toggle(&stage);
        type_value(&mut input, "ftp://example.com/file");

        assert_eq!(input.submit(&stage), None);
        assert_eq!(input.field().variant(), FieldVariant::Danger);
    }

    #[test]
    fn test_enter_reports_submission_event() {
        let (stage, mut input) = fixture();
        input.toggle(&stage);
        type_value(&mut input, "https://example.com");

        assert_eq!(input.input(Key::Enter), Some(TextFieldEvent::Submitted));
        // The caller performs the actual submit
        assert!(input.is_open());
        assert!(input.submit(&stage).is_some());
    }

    #[test]
    fn test_outside_interaction_dismisses() {
        let (stage, mut input) = fixture();
        let outside = stage.insert(None, Rect::new(700.0, 700.0, 5.0, 5.0));

        input.toggle(&stage);
        stage.advance(DEFAULT_ARM_DELAY);
        stage.dispatch_pointer(Some(outside));
        input.update(&stage);

        assert!(!input.is_open());
        assert!(!input.field().is_focused());
    }

    #[test]
    fn test_interaction_in_panel_keeps_it_open() {
        let (stage, mut input) = fixture();

        input.toggle(&stage);
        stage.advance(DEFAULT_ARM_DELAY);
        stage.dispatch_pointer(Some(input.field().element()));
        input.update(&stage);

        assert!(input.is_open());
    }
}
