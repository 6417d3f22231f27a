//! Linkdock Host Library
//!
//! Host-environment services for the linkdock component library.
//!
//! UI components are headless: they never draw, they only ask questions of
//! the environment they are mounted in. This crate provides that
//! environment as a single [`Stage`] value:
//!
//! - A retained element tree answering bounding-rectangle queries
//! - Page scroll offsets and the root font size
//! - A global pointer-event bus with scoped listener guards
//! - A virtual clock driving cancellable timers
//!
//! # Example
//!
//! ```
//! use linkdock_host::{Rect, Stage};
//! use std::time::Duration;
//!
//! let stage = Stage::new();
//! let button = stage.insert(None, Rect::new(10.0, 10.0, 80.0, 24.0));
//!
//! let _guard = stage.add_pointer_listener(|_stage, event| {
//!     println!("pointer hit {:?}", event.target);
//! });
//!
//! stage.advance(Duration::from_millis(16));
//! stage.dispatch_pointer(Some(button));
//! ```

mod events;
mod geometry;
mod stage;
mod timer;

// Re-export public API
pub use events::{ListenerGuard, PointerEvent};
pub use geometry::{Point, Rect};
pub use stage::{ElementId, Stage};
pub use timer::TimerHandle;
