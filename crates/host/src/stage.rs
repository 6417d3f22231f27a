//! Retained element tree and environment queries
//!
//! The stage stands in for the host's layout surface. Elements are plain
//! rectangles in page coordinates arranged in a parent/child tree; the
//! stage answers the environment queries the component library consumes:
//! bounding rectangles, scroll offsets, the root font size, pointer-event
//! subscription, and a non-blocking delay primitive.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use log::trace;

use crate::events::{ListenerGuard, PointerEvent, PointerListeners};
use crate::geometry::{Point, Rect};
use crate::timer::{TimerHandle, TimerQueue};

/// Default root font size in pixels, used to resolve rem-valued offsets
pub const DEFAULT_ROOT_FONT_SIZE: f32 = 16.0;

/// Unique identifier for a mounted element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(u64);

impl ElementId {
    fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, Clone, Copy)]
struct Element {
    parent: Option<ElementId>,
    /// Bounds in page coordinates
    rect: Rect,
}

/// The host environment for a tree of headless components
pub struct Stage {
    elements: Mutex<HashMap<ElementId, Element>>,
    scroll: Mutex<(f32, f32)>,
    root_font_size: Mutex<f32>,
    listeners: PointerListeners,
    timers: TimerQueue,
    now: Mutex<Duration>,
}

impl Stage {
    /// Create an empty stage with the clock at zero
    pub fn new() -> Self {
        Self {
            elements: Mutex::new(HashMap::new()),
            scroll: Mutex::new((0.0, 0.0)),
            root_font_size: Mutex::new(DEFAULT_ROOT_FONT_SIZE),
            listeners: PointerListeners::default(),
            timers: TimerQueue::default(),
            now: Mutex::new(Duration::ZERO),
        }
    }

    // ── Element tree ────────────────────────────────────────────────────

    /// Mount a new element and return its id.
    ///
    /// `rect` is in page coordinates. A missing parent mounts the element
    /// at the root.
    pub fn insert(&self, parent: Option<ElementId>, rect: Rect) -> ElementId {
        let id = ElementId::next();
        self.elements
            .lock()
            .unwrap()
            .insert(id, Element { parent, rect });
        id
    }

    /// Unmount an element together with its entire subtree
    pub fn remove(&self, id: ElementId) {
        let mut elements = self.elements.lock().unwrap();
        let mut doomed = vec![id];
        while let Some(current) = doomed.pop() {
            elements.remove(&current);
            doomed.extend(
                elements
                    .iter()
                    .filter(|(_, element)| element.parent == Some(current))
                    .map(|(child, _)| *child),
            );
        }
    }

    /// Check whether an element is currently mounted
    pub fn is_mounted(&self, id: ElementId) -> bool {
        self.elements.lock().unwrap().contains_key(&id)
    }

    /// Replace an element's page-coordinate bounds
    pub fn set_rect(&self, id: ElementId, rect: Rect) {
        if let Some(element) = self.elements.lock().unwrap().get_mut(&id) {
            element.rect = rect;
        }
    }

    /// Move an element's top-left corner to a page-coordinate point,
    /// keeping its size. The element's subtree moves with it.
    pub fn move_to(&self, id: ElementId, origin: Point) {
        let mut elements = self.elements.lock().unwrap();
        let Some(element) = elements.get(&id) else {
            return;
        };
        let dx = origin.x - element.rect.x;
        let dy = origin.y - element.rect.y;

        let mut pending = vec![id];
        let mut subtree = Vec::new();
        while let Some(current) = pending.pop() {
            subtree.push(current);
            pending.extend(
                elements
                    .iter()
                    .filter(|(_, element)| element.parent == Some(current))
                    .map(|(child, _)| *child),
            );
        }
        for member in subtree {
            if let Some(element) = elements.get_mut(&member) {
                element.rect = element.rect.translated(dx, dy);
            }
        }
    }

    /// Element bounds in page coordinates
    pub fn page_rect(&self, id: ElementId) -> Option<Rect> {
        self.elements
            .lock()
            .unwrap()
            .get(&id)
            .map(|element| element.rect)
    }

    /// Element bounds relative to the viewport, i.e. the page rect shifted
    /// by the current scroll offsets. `None` when the element is not
    /// mounted.
    pub fn bounding_rect(&self, id: ElementId) -> Option<Rect> {
        let rect = self.page_rect(id)?;
        let (scroll_x, scroll_y) = self.scroll_offset();
        Some(rect.translated(-scroll_x, -scroll_y))
    }

    /// Ancestor-or-self containment test: does `target` sit inside the
    /// subtree rooted at `ancestor`?
    pub fn contains(&self, ancestor: ElementId, target: ElementId) -> bool {
        let elements = self.elements.lock().unwrap();
        let mut current = Some(target);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = elements.get(&id).and_then(|element| element.parent);
        }
        false
    }

    // ── Environment queries ─────────────────────────────────────────────

    /// Current page scroll offsets (x, y)
    pub fn scroll_offset(&self) -> (f32, f32) {
        *self.scroll.lock().unwrap()
    }

    /// Set the page scroll offsets
    pub fn set_scroll(&self, x: f32, y: f32) {
        *self.scroll.lock().unwrap() = (x, y);
    }

    /// Root element's computed font size in pixels
    pub fn root_font_size(&self) -> f32 {
        *self.root_font_size.lock().unwrap()
    }

    /// Set the root font size in pixels
    pub fn set_root_font_size(&self, px: f32) {
        *self.root_font_size.lock().unwrap() = px;
    }

    // ── Pointer events ──────────────────────────────────────────────────

    /// Install a global pointer listener.
    ///
    /// The listener stays active until the returned guard is dropped.
    pub fn add_pointer_listener(
        &self,
        handler: impl Fn(&Stage, &PointerEvent) + Send + Sync + 'static,
    ) -> ListenerGuard {
        self.listeners.add(Arc::new(handler))
    }

    /// Number of currently installed pointer listeners
    pub fn active_listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Deliver a pointer interaction to every installed listener, in
    /// installation order. `None` models a host that could not resolve the
    /// interaction's target.
    pub fn dispatch_pointer(&self, target: Option<ElementId>) {
        trace!("dispatch pointer, target {target:?}");
        let event = PointerEvent { target };
        for handler in self.listeners.snapshot() {
            handler(self, &event);
        }
    }

    // ── Clock and timers ────────────────────────────────────────────────

    /// Current virtual time since the stage was created
    pub fn now(&self) -> Duration {
        *self.now.lock().unwrap()
    }

    /// Schedule a one-shot callback to run `delay` from now.
    ///
    /// The callback runs during a later [`Stage::advance`] once the clock
    /// passes the deadline, unless the handle is cancelled first.
    pub fn schedule(
        &self,
        delay: Duration,
        callback: impl FnOnce(&Stage) + Send + 'static,
    ) -> TimerHandle {
        let deadline = self.now() + delay;
        self.timers.schedule(deadline, Box::new(callback))
    }

    /// Advance the virtual clock and run every timer that came due
    pub fn advance(&self, dt: Duration) {
        let now = {
            let mut now = self.now.lock().unwrap();
            *now += dt;
            *now
        };
        self.timers.run_due(now, self);
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::new()
    }
}
