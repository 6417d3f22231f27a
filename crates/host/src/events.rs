//! Global pointer-event bus with scoped listener guards
//!
//! Listeners are installed by handing a handler to the stage and holding on
//! to the returned [`ListenerGuard`]. Dropping the guard removes the
//! listener, so a listener can never outlive its owner. Dispatch works on a
//! snapshot of the listener list, which lets handlers subscribe or
//! unsubscribe while an event is being delivered.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

use crate::stage::{ElementId, Stage};

/// A pointer interaction delivered to every installed listener.
///
/// `target` is the element the interaction landed on. A host that cannot
/// resolve a target delivers `None`; consumers are expected to treat that
/// as "not outside" rather than fail.
#[derive(Debug, Clone, Copy)]
pub struct PointerEvent {
    pub target: Option<ElementId>,
}

pub(crate) type PointerHandler = Arc<dyn Fn(&Stage, &PointerEvent) + Send + Sync>;

type ListenerSlot = (u64, PointerHandler);

/// Registry of installed pointer listeners
#[derive(Default)]
pub(crate) struct PointerListeners {
    slots: Arc<Mutex<Vec<ListenerSlot>>>,
    next_id: AtomicU64,
}

impl PointerListeners {
    pub(crate) fn add(&self, handler: PointerHandler) -> ListenerGuard {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.slots.lock().unwrap().push((id, handler));
        ListenerGuard {
            id,
            slots: Arc::downgrade(&self.slots),
        }
    }

    /// Snapshot the handlers in installation order
    pub(crate) fn snapshot(&self) -> Vec<PointerHandler> {
        self.slots
            .lock()
            .unwrap()
            .iter()
            .map(|(_, handler)| Arc::clone(handler))
            .collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.lock().unwrap().len()
    }
}

/// Scoped handle to an installed pointer listener.
///
/// The listener stays installed for exactly as long as the guard is alive.
/// This is the mechanism that makes "no leaked global listeners" a property
/// of ownership instead of a calling convention.
#[must_use = "dropping the guard immediately removes the listener"]
pub struct ListenerGuard {
    id: u64,
    slots: Weak<Mutex<Vec<ListenerSlot>>>,
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        if let Some(slots) = self.slots.upgrade() {
            slots.lock().unwrap().retain(|(id, _)| *id != self.id);
        }
    }
}
