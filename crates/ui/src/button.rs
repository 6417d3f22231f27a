//! Button component
//!
//! Presentational push button with an optional label and icon. Disabled
//! buttons swallow presses. Geometry lives on the stage so the button can
//! anchor a dropdown.

use linkdock_host::{ElementId, Rect, Stage};

use crate::theme::{current_theme, Color};

/// Visual variant of a button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    #[default]
    Default,
    Success,
    Info,
    Warn,
    Danger,
}

/// Button size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonSize {
    Tiny,
    #[default]
    Small,
    Medium,
    Large,
}

/// Icons a button can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonIcon {
    Add,
    Dots,
    Refresh,
    Trash,
    ArrowDown,
}

/// A push button mounted on the stage
pub struct Button {
    element: ElementId,
    label: Option<String>,
    icon: Option<ButtonIcon>,
    variant: ButtonVariant,
    size: ButtonSize,
    disabled: bool,
}

impl Button {
    /// Mount a new button
    pub fn new(stage: &Stage, parent: Option<ElementId>, rect: Rect) -> Self {
        Self {
            element: stage.insert(parent, rect),
            label: None,
            icon: None,
            variant: ButtonVariant::default(),
            size: ButtonSize::default(),
            disabled: false,
        }
    }

    /// Set the label text
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the icon
    pub fn with_icon(mut self, icon: ButtonIcon) -> Self {
        self.icon = Some(icon);
        self
    }

    /// Set the visual variant
    pub fn with_variant(mut self, variant: ButtonVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Set the size
    pub fn with_size(mut self, size: ButtonSize) -> Self {
        self.size = size;
        self
    }

    /// The stage element backing this button
    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn icon(&self) -> Option<ButtonIcon> {
        self.icon
    }

    pub fn variant(&self) -> ButtonVariant {
        self.variant
    }

    pub fn size(&self) -> ButtonSize {
        self.size
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Enable or disable the button
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Icon with no label renders as a square icon button
    pub fn is_icon_only(&self) -> bool {
        self.icon.is_some() && self.label.is_none()
    }

    /// Register a press. Returns whether it activated; disabled buttons
    /// ignore presses.
    pub fn press(&self) -> bool {
        !self.disabled
    }

    /// Hit-test a viewport-coordinate point against the button's bounds.
    /// An unmounted button hits nothing.
    pub fn hit_test(&self, stage: &Stage, x: f32, y: f32) -> bool {
        stage
            .bounding_rect(self.element)
            .is_some_and(|rect| rect.contains(x, y))
    }

    /// Fill color for the current variant and disabled state
    pub fn fill_color(&self) -> Color {
        let colors = &current_theme().colors;
        if self.disabled {
            return colors.button_disabled;
        }
        match self.variant {
            ButtonVariant::Default => colors.accent_primary,
            ButtonVariant::Success => colors.accent_success,
            ButtonVariant::Info => colors.accent_info,
            ButtonVariant::Warn => colors.accent_warn,
            ButtonVariant::Danger => colors.accent_danger,
        }
    }
}
