//! Linkdock UI Library
//!
//! Headless UI component library: buttons, text fields, and a positioned
//! dropdown system with outside-interaction dismissal. Components carry
//! their own state and geometry on a [`linkdock_host::Stage`]; rendering is
//! left to whatever surface embeds them.

pub mod button;
pub mod dropdown;
pub mod text_field;
pub mod theme;
