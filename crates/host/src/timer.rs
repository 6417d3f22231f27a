//! Cancellable timer queue driven by the stage clock
//!
//! Timers are scheduled against the stage's virtual clock and fire when the
//! clock advances past their deadline. Every scheduled timer comes with a
//! [`TimerHandle`]; cancelling the handle guarantees the callback never
//! runs. Due timers fire in deadline order, FIFO among equal deadlines.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::stage::Stage;

type TimerCallback = Box<dyn FnOnce(&Stage) + Send>;

/// Handle to a scheduled timer.
///
/// Cancellation is cooperative and idempotent: the queue checks the flag
/// right before running the callback, so a cancel that lands any time
/// before the deadline wins.
#[derive(Clone)]
pub struct TimerHandle {
    cancelled: Arc<AtomicBool>,
}

impl TimerHandle {
    /// Cancel the timer. Safe to call more than once.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Check whether the timer has been cancelled
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

struct Entry {
    deadline: Duration,
    seq: u64,
    cancelled: Arc<AtomicBool>,
    callback: TimerCallback,
}

/// Pending timers, owned by the stage
#[derive(Default)]
pub(crate) struct TimerQueue {
    entries: Mutex<Vec<Entry>>,
    next_seq: AtomicU64,
}

impl TimerQueue {
    pub(crate) fn schedule(&self, deadline: Duration, callback: TimerCallback) -> TimerHandle {
        let cancelled = Arc::new(AtomicBool::new(false));
        let entry = Entry {
            deadline,
            seq: self.next_seq.fetch_add(1, Ordering::Relaxed),
            cancelled: Arc::clone(&cancelled),
            callback,
        };
        self.entries.lock().unwrap().push(entry);
        TimerHandle { cancelled }
    }

    /// Run every due, non-cancelled timer.
    ///
    /// Entries are popped one at a time so a callback that schedules another
    /// already-due timer still gets it to run within the same advance. The
    /// queue lock is never held while a callback executes.
    pub(crate) fn run_due(&self, now: Duration, stage: &Stage) {
        while let Some(entry) = self.pop_next_due(now) {
            if entry.cancelled.load(Ordering::Acquire) {
                continue;
            }
            (entry.callback)(stage);
        }
    }

    fn pop_next_due(&self, now: Duration) -> Option<Entry> {
        let mut entries = self.entries.lock().unwrap();
        let index = entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.deadline <= now)
            .min_by_key(|(_, entry)| (entry.deadline, entry.seq))
            .map(|(index, _)| index)?;
        Some(entries.swap_remove(index))
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn counter_callback(counter: &Arc<AtomicUsize>) -> TimerCallback {
        let counter = Arc::clone(counter);
        Box::new(move |_| {
            counter.fetch_add(1, Ordering::Relaxed);
        })
    }

    #[test]
    fn test_timer_fires_after_deadline() {
        let stage = Stage::new();
        let fired = Arc::new(AtomicUsize::new(0));

        stage.schedule(Duration::from_millis(10), {
            let fired = Arc::clone(&fired);
            move |_| {
                fired.fetch_add(1, Ordering::Relaxed);
            }
        });

        stage.advance(Duration::from_millis(9));
        assert_eq!(fired.load(Ordering::Relaxed), 0);

        stage.advance(Duration::from_millis(1));
        assert_eq!(fired.load(Ordering::Relaxed), 1);

        // One-shot: advancing again does not re-fire
        stage.advance(Duration::from_millis(50));
        assert_eq!(fired.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_cancelled_timer_never_runs() {
        let stage = Stage::new();
        let fired = Arc::new(AtomicUsize::new(0));

        let handle = stage.schedule(Duration::from_millis(10), {
            let fired = Arc::clone(&fired);
            move |_| {
                fired.fetch_add(1, Ordering::Relaxed);
            }
        });

        handle.cancel();
        assert!(handle.is_cancelled());

        stage.advance(Duration::from_millis(100));
        assert_eq!(fired.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_timers_run_in_deadline_order_with_fifo_ties() {
        let stage = Stage::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for (label, delay_ms) in [("late", 20u64), ("first-tie", 10), ("second-tie", 10)] {
            let order = Arc::clone(&order);
            stage.schedule(Duration::from_millis(delay_ms), move |_| {
                order.lock().unwrap().push(label);
            });
        }

        stage.advance(Duration::from_millis(30));
        assert_eq!(
            *order.lock().unwrap(),
            vec!["first-tie", "second-tie", "late"]
        );
    }

    #[test]
    fn test_callback_may_schedule_followup() {
        let stage = Stage::new();
        let fired = Arc::new(AtomicUsize::new(0));

        stage.schedule(Duration::from_millis(5), {
            let fired = Arc::clone(&fired);
            move |stage| {
                fired.fetch_add(1, Ordering::Relaxed);
                let fired = Arc::clone(&fired);
                stage.schedule(Duration::from_millis(0), move |_| {
                    fired.fetch_add(1, Ordering::Relaxed);
                });
            }
        });

        // The follow-up was scheduled already-due, so it runs in the same advance
        stage.advance(Duration::from_millis(5));
        assert_eq!(fired.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn test_queue_drains_fired_entries() {
        let stage = Stage::new();
        let counter = Arc::new(AtomicUsize::new(0));

        let queue = TimerQueue::default();
        queue.schedule(Duration::from_millis(1), counter_callback(&counter));
        queue.schedule(Duration::from_millis(2), counter_callback(&counter));
        assert_eq!(queue.len(), 2);

        queue.run_due(Duration::from_millis(1), &stage);
        assert_eq!(queue.len(), 1);

        queue.run_due(Duration::from_millis(2), &stage);
        assert_eq!(queue.len(), 0);
        assert_eq!(counter.load(Ordering::Relaxed), 2);
    }
}
