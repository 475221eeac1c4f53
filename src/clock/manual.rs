use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use rustc_hash::FxHashMap;

use super::{Scheduler, TimerCallback, TimerId};

/// Virtual-time scheduler.
///
/// Time only moves when [`advance`](Self::advance) or
/// [`advance_to`](Self::advance_to) is called. Due callbacks fire in
/// timestamp order; callbacks due at the same instant fire in the order they
/// were scheduled. Callbacks scheduled while advancing fire in the same
/// advance if they fall inside the window.
///
/// Cloning yields another handle to the same clock, so a test can keep one
/// handle while a timeline owns the other.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    state: Rc<RefCell<ManualState>>,
}

#[derive(Default)]
struct ManualState {
    now: Duration,
    next_id: u64,
    /// Pending callbacks keyed by (due time, scheduling order).
    queue: BTreeMap<(Duration, u64), TimerCallback>,
    /// Timer id -> due time, for cancellation.
    due: FxHashMap<u64, Duration>,
}

impl ManualScheduler {
    /// A clock at time zero with nothing scheduled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward by `by`, firing every callback that comes due.
    pub fn advance(&self, by: Duration) {
        let target = self.now().saturating_add(by);
        self.advance_to(target);
    }

    /// Move time forward to `target`, firing every callback that comes due.
    ///
    /// Targets in the past leave the clock where it is.
    pub fn advance_to(&self, target: Duration) {
        loop {
            let next = {
                let mut state = self.state.borrow_mut();
                match state.queue.first_key_value() {
                    Some((&(due, id), _)) if due <= target => {
                        let callback = state.queue.remove(&(due, id));
                        let _ = state.due.remove(&id);
                        state.now = state.now.max(due);
                        callback
                    }
                    _ => None,
                }
            };
            match next {
                Some(callback) => callback(),
                None => break,
            }
        }

        let mut state = self.state.borrow_mut();
        state.now = state.now.max(target);
    }

    /// Number of callbacks waiting to fire.
    pub fn pending(&self) -> usize {
        self.state.borrow().queue.len()
    }

    /// Due time of the earliest pending callback.
    pub fn next_due(&self) -> Option<Duration> {
        self.state
            .borrow()
            .queue
            .first_key_value()
            .map(|(&(due, _), _)| due)
    }
}

impl Scheduler for ManualScheduler {
    fn now(&self) -> Duration {
        self.state.borrow().now
    }

    fn schedule(&self, delay: Duration, callback: TimerCallback) -> TimerId {
        let mut state = self.state.borrow_mut();
        let id = state.next_id;
        state.next_id += 1;
        let due = state.now.saturating_add(delay);
        let _ = state.queue.insert((due, id), callback);
        let _ = state.due.insert(id, due);
        TimerId::from_raw(id)
    }

    fn cancel(&self, timer: TimerId) {
        let mut state = self.state.borrow_mut();
        if let Some(due) = state.due.remove(&timer.raw()) {
            let _ = state.queue.remove(&(due, timer.raw()));
        }
    }
}

impl fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("ManualScheduler")
            .field("now", &state.now)
            .field("pending", &state.queue.len())
            .finish()
    }
}
