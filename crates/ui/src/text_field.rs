//! Single-line text field component
//!
//! Holds the value, focus flag, and visual variant; key handling reports
//! submission to the parent instead of acting on it.

use linkdock_host::{ElementId, Rect, Stage};

use crate::theme::{current_theme, Color};

/// Visual variant of a text field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldVariant {
    #[default]
    Default,
    Danger,
}

/// Keys the field reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Backspace,
    Enter,
}

/// Events a field reports back to its parent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextFieldEvent {
    /// Enter was pressed; the parent decides what submitting means
    Submitted,
}

/// A single-line text input mounted on the stage
pub struct TextField {
    element: ElementId,
    value: String,
    placeholder: String,
    variant: FieldVariant,
    focused: bool,
}

impl TextField {
    /// Mount a new empty field
    pub fn new(stage: &Stage, parent: Option<ElementId>, rect: Rect) -> Self {
        Self {
            element: stage.insert(parent, rect),
            value: String::new(),
            placeholder: String::new(),
            variant: FieldVariant::default(),
            focused: false,
        }
    }

    /// Set the placeholder text
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// The stage element backing this field
    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn variant(&self) -> FieldVariant {
        self.variant
    }

    /// Change the visual variant
    pub fn set_variant(&mut self, variant: FieldVariant) {
        self.variant = variant;
    }

    /// Replace the whole value
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// Clear the value
    pub fn clear(&mut self) {
        self.value.clear();
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn focus(&mut self) {
        self.focused = true;
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    /// Feed a key press. Printable characters and Backspace edit the value;
    /// Enter reports a submission.
    pub fn handle_key(&mut self, key: Key) -> Option<TextFieldEvent> {
        match key {
            Key::Char(c) => {
                self.value.push(c);
                None
            }
            Key::Backspace => {
                self.value.pop();
                None
            }
            Key::Enter => Some(TextFieldEvent::Submitted),
        }
    }

    /// Border color for the current variant
    pub fn border_color(&self) -> Color {
        let colors = &current_theme().colors;
        match self.variant {
            FieldVariant::Default => colors.border,
            FieldVariant::Danger => colors.border_danger,
        }
    }
}
