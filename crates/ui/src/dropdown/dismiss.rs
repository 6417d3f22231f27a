//! Outside-interaction dismissal for open panels
//!
//! While a panel is open, a single global pointer listener watches for
//! interactions that land outside both the panel and its anchor and signals
//! a close when one does. The listener is not installed immediately: arming
//! waits out a short delay so that a programmatic open trigger is not read
//! back as an outside interaction by the listener it just created.
//!
//! The controller only detects and signals. The owner of the open flag is
//! responsible for actually flipping state in response.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use linkdock_host::{ElementId, ListenerGuard, Stage, TimerHandle};
use log::debug;

/// Default delay between a panel opening and its dismissal listener arming.
///
/// The value is empirical and environment-dependent, which is why it is a
/// parameter of the controller rather than a baked-in constant.
pub const DEFAULT_ARM_DELAY: Duration = Duration::from_millis(10);

/// Close request flag shared between a dismissal callback and the owner of
/// the open flag.
///
/// Dismissal requests a close; the owner drains the flag and flips its own
/// state. Requests are idempotent until drained.
#[derive(Clone, Default)]
pub struct CloseSignal {
    requested: Arc<AtomicBool>,
}

impl CloseSignal {
    /// Create a signal with no pending request
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a close
    pub fn request(&self) {
        self.requested.store(true, Ordering::Release);
    }

    /// Check for a pending request without clearing it
    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::Acquire)
    }

    /// Drain the signal: returns whether a close was requested and clears
    /// the flag
    pub fn take(&self) -> bool {
        self.requested.swap(false, Ordering::AcqRel)
    }
}

enum Phase {
    Idle,
    ArmPending { timer: TimerHandle },
    Armed { _listener: ListenerGuard },
}

struct Shared {
    phase: Phase,
    /// Ties timers and listeners to the arm cycle that created them; a
    /// stale cycle's callbacks find a newer generation and stand down.
    generation: u64,
}

/// Lifecycle manager for outside-interaction dismissal of one panel.
///
/// State machine per instance: Idle, ArmPending (arm timer scheduled),
/// Armed (pointer listener installed). `set_open(false)` and drop both
/// cancel any pending timer and release any installed listener, so a
/// callback can never fire after teardown.
pub struct DismissalController {
    anchor: ElementId,
    panel: ElementId,
    arm_delay: Duration,
    on_close: Arc<dyn Fn() + Send + Sync>,
    shared: Arc<Mutex<Shared>>,
}

impl DismissalController {
    /// Create a controller for an anchor/panel pair.
    ///
    /// `on_close` fires once per outside interaction while armed.
    pub fn new(
        anchor: ElementId,
        panel: ElementId,
        arm_delay: Duration,
        on_close: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        Self {
            anchor,
            panel,
            arm_delay,
            on_close: Arc::new(on_close),
            shared: Arc::new(Mutex::new(Shared {
                phase: Phase::Idle,
                generation: 0,
            })),
        }
    }

    /// Follow the open flag of the owning component.
    ///
    /// Opening schedules a fresh arm cycle, delay included, even when the
    /// previous cycle was still pending. Closing cancels the pending timer
    /// or removes the installed listener. Arming is skipped while the
    /// anchor or panel is not mounted.
    pub fn set_open(&self, stage: &Stage, open: bool) {
        self.disarm();
        if !open {
            return;
        }
        if !stage.is_mounted(self.anchor) || !stage.is_mounted(self.panel) {
            debug!("dismissal arming skipped, anchor or panel not mounted");
            return;
        }

        let generation = {
            let mut state = self.shared.lock().unwrap();
            state.generation += 1;
            state.generation
        };

        let shared = Arc::downgrade(&self.shared);
        let anchor = self.anchor;
        let panel = self.panel;
        let on_close = Arc::clone(&self.on_close);
        let timer = stage.schedule(self.arm_delay, move |stage| {
            Self::arm(stage, &shared, generation, anchor, panel, on_close);
        });

        let mut state = self.shared.lock().unwrap();
        if state.generation == generation {
            state.phase = Phase::ArmPending { timer };
        }
    }

    /// Cancel any pending arm timer and release any installed listener
    fn disarm(&self) {
        let mut state = self.shared.lock().unwrap();
        match std::mem::replace(&mut state.phase, Phase::Idle) {
            Phase::ArmPending { timer } => {
                timer.cancel();
                debug!("pending dismissal arm cancelled");
            }
            Phase::Armed { .. } => {
                debug!("dismissal listener removed");
            }
            Phase::Idle => {}
        }
    }

    fn arm(
        stage: &Stage,
        shared: &Weak<Mutex<Shared>>,
        generation: u64,
        anchor: ElementId,
        panel: ElementId,
        on_close: Arc<dyn Fn() + Send + Sync>,
    ) {
        let Some(strong) = shared.upgrade() else {
            return;
        };

        let handler_shared = Weak::clone(shared);
        let guard = stage.add_pointer_listener(move |stage, event| {
            let Some(strong) = handler_shared.upgrade() else {
                return;
            };
            {
                let state = strong.lock().unwrap();
                if state.generation != generation || !matches!(state.phase, Phase::Armed { .. }) {
                    return;
                }
            }
            // A host that cannot name the target gets treated as "inside":
            // prefer not dismissing over dismissing spuriously.
            let Some(target) = event.target else {
                return;
            };
            if stage.contains(anchor, target) || stage.contains(panel, target) {
                return;
            }
            debug!("outside interaction, requesting close");
            on_close();
        });

        let mut state = strong.lock().unwrap();
        if state.generation == generation && matches!(state.phase, Phase::ArmPending { .. }) {
            debug!("dismissal listener armed");
            state.phase = Phase::Armed { _listener: guard };
        }
        // A newer cycle superseded this arm: dropping the guard here
        // uninstalls the listener again right away.
    }
}

impl Drop for DismissalController {
    fn drop(&mut self) {
        self.disarm();
    }
}
