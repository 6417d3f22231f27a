//! Placement arithmetic for floating panels
//!
//! Pure pixel math: given an alignment rule built from the anchor's
//! geometry, compute where the panel's top-left corner goes. No state, no
//! environment access, no clamping.

use linkdock_host::{Point, Rect};

/// Default vertical gap between anchor and panel, in rems.
///
/// Dictated by the Figma designs the original layout followed.
pub const DEFAULT_TOP_OFFSET_REM: f32 = 0.13;

/// Which edge of the anchor a panel aligns to.
///
/// Call sites configure a kind once; the full [`Placement`] is built from
/// live anchor geometry each time the panel opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlacementKind {
    #[default]
    Left,
    Middle,
    Right,
}

/// Alignment rule for an open panel.
///
/// `top` and `left` are the anchor's reference point in page coordinates,
/// already corrected for scroll by whoever built the value. `Middle` and
/// `Right` carry the anchor's rectangle because their arithmetic needs its
/// width; the variants make it impossible to request those alignments
/// without one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Panel's left edge pins exactly to the reference point
    Left { top: f32, left: f32 },
    /// Panel's horizontal center aligns with the anchor's midpoint
    Middle { top: f32, left: f32, anchor: Rect },
    /// Panel's right edge aligns with the anchor's right edge
    Right { top: f32, left: f32, anchor: Rect },
}

impl Placement {
    /// The alignment kind of this rule
    pub fn kind(&self) -> PlacementKind {
        match self {
            Self::Left { .. } => PlacementKind::Left,
            Self::Middle { .. } => PlacementKind::Middle,
            Self::Right { .. } => PlacementKind::Right,
        }
    }
}

/// Resolve a placement to the panel's top-left corner in page coordinates.
///
/// `top_offset_rem` is an extra vertical gap in rems, converted using
/// `root_font_px`. `panel_width` is the panel's own rendered width; it can
/// only be measured once the panel exists in the layout, so the caller
/// supplies it, and only `Middle` and `Right` consult it.
///
/// The result is deliberately not clamped to the viewport: a panel may
/// resolve partially or fully off-screen.
pub fn resolve(
    placement: Placement,
    top_offset_rem: f32,
    root_font_px: f32,
    panel_width: f32,
) -> Point {
    let top_offset = top_offset_rem * root_font_px;
    match placement {
        Placement::Left { top, left } => Point::new(left, top + top_offset),
        Placement::Middle { top, left, anchor } => Point::new(
            left + anchor.width / 2.0 - panel_width / 2.0,
            top + top_offset,
        ),
        Placement::Right { top, left, anchor } => {
            Point::new(left - (panel_width - anchor.width), top + top_offset)
        }
    }
}
