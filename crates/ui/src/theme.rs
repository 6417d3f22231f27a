//! Centralized theme module for consistent visual styling.
//!
//! Components read semantic color tokens from here instead of hard-coding
//! values, so a surface that embeds them can restyle everything in one
//! place. The default palette is the light one the original designs used.

/// RGBA color value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Create a new color from RGBA values (0.0 to 1.0)
    pub fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a new opaque color from RGB values
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

/// Semantic color tokens, organized by meaning rather than appearance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemeColors {
    /// Page background
    pub background: Color,

    /// Panel and dropdown surface background
    pub surface: Color,

    /// Primary text color
    pub text_primary: Color,

    /// Secondary text (labels, subtitles)
    pub text_secondary: Color,

    /// Muted text (placeholders, disabled entries)
    pub text_muted: Color,

    /// Primary accent (default buttons, focus)
    pub accent_primary: Color,

    /// Success accent
    pub accent_success: Color,

    /// Informational accent
    pub accent_info: Color,

    /// Warning accent
    pub accent_warn: Color,

    /// Danger accent (destructive actions, invalid input)
    pub accent_danger: Color,

    /// General border color
    pub border: Color,

    /// Border for fields in the danger state
    pub border_danger: Color,

    /// Disabled button fill
    pub button_disabled: Color,
}

impl ThemeColors {
    /// Light palette (the default)
    pub fn light() -> Self {
        Self {
            background: Color::rgb(0.98, 0.98, 0.99),
            surface: Color::rgb(1.0, 1.0, 1.0),
            text_primary: Color::rgb(0.1, 0.11, 0.13),
            text_secondary: Color::rgb(0.35, 0.37, 0.4),
            text_muted: Color::rgb(0.6, 0.62, 0.65),
            accent_primary: Color::rgb(0.27, 0.45, 0.95),
            accent_success: Color::rgb(0.2, 0.65, 0.35),
            accent_info: Color::rgb(0.25, 0.55, 0.85),
            accent_warn: Color::rgb(0.9, 0.65, 0.2),
            accent_danger: Color::rgb(0.88, 0.25, 0.25),
            border: Color::rgb(0.85, 0.86, 0.88),
            border_danger: Color::rgb(0.88, 0.25, 0.25),
            button_disabled: Color::rgb(0.92, 0.92, 0.94),
        }
    }

    /// Dark palette
    pub fn dark() -> Self {
        Self {
            background: Color::rgb(0.1, 0.1, 0.12),
            surface: Color::rgb(0.16, 0.16, 0.18),
            text_primary: Color::rgb(0.92, 0.92, 0.94),
            text_secondary: Color::rgb(0.7, 0.72, 0.75),
            text_muted: Color::rgb(0.5, 0.52, 0.55),
            accent_primary: Color::rgb(0.35, 0.55, 1.0),
            accent_success: Color::rgb(0.25, 0.75, 0.45),
            accent_info: Color::rgb(0.35, 0.65, 0.95),
            accent_warn: Color::rgb(0.95, 0.7, 0.25),
            accent_danger: Color::rgb(0.95, 0.35, 0.35),
            border: Color::rgb(0.28, 0.28, 0.32),
            border_danger: Color::rgb(0.95, 0.35, 0.35),
            button_disabled: Color::rgb(0.22, 0.22, 0.25),
        }
    }
}

/// Complete theme definition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub colors: ThemeColors,
}

impl Theme {
    /// Light theme (the default)
    pub fn light() -> Self {
        Self {
            colors: ThemeColors::light(),
        }
    }

    /// Dark theme
    pub fn dark() -> Self {
        Self {
            colors: ThemeColors::dark(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

static CURRENT_THEME: std::sync::OnceLock<Theme> = std::sync::OnceLock::new();

/// Get the active theme.
///
/// Falls back to the default light theme if [`init_theme`] was never called.
pub fn current_theme() -> &'static Theme {
    CURRENT_THEME.get_or_init(Theme::default)
}

/// Install the theme for the lifetime of the process.
///
/// Only the first call has any effect; later calls are ignored, and an
/// earlier [`current_theme`] read locks in the default.
pub fn init_theme(theme: Theme) {
    let _ = CURRENT_THEME.set(theme);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_light_theme_is_light() {
        let colors = ThemeColors::light();

        assert!(colors.background.r > 0.9);
        assert!(colors.text_primary.r < 0.2);
    }

    #[test]
    fn test_dark_theme_is_dark() {
        let colors = ThemeColors::dark();

        assert!(colors.background.r < 0.2);
        assert!(colors.text_primary.r > 0.8);
    }

    #[test]
    fn test_danger_accent_is_red() {
        for colors in [ThemeColors::light(), ThemeColors::dark()] {
            assert!(colors.accent_danger.r > colors.accent_danger.g);
            assert!(colors.accent_danger.r > colors.accent_danger.b);
        }
    }

    #[test]
    fn test_default_theme_is_light() {
        assert_eq!(Theme::default(), Theme::light());
    }

    #[test]
    fn test_colors_are_opaque() {
        let colors = ThemeColors::light();
        assert_eq!(colors.surface.a, 1.0);
        assert_eq!(Color::rgba(0.1, 0.2, 0.3, 0.5).a, 0.5);
    }
}
