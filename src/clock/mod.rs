//! Deferred-callback scheduling for timeline drivers.
//!
//! A [`SequenceTimeline`](crate::animation::SequenceTimeline) never reads a
//! wall clock or sets a timer directly. It asks an injected [`Scheduler`] for
//! the current time and for "run this after N", and keeps the returned
//! [`TimerId`] so it can cancel the pending callback.
//!
//! - [`ManualScheduler`] - virtual time advanced explicitly; the fake clock
//!   for tests and frame-driven hosts.
//! - [`RealtimeScheduler`] - a [`ManualScheduler`] pumped from a monotonic
//!   [`web_time::Instant`].
//! - `WebScheduler` (feature `web`) - `window.setTimeout` in the browser.

mod manual;
mod realtime;
#[cfg(feature = "web")]
mod web;

use std::rc::Rc;
use std::time::Duration;

pub use manual::ManualScheduler;
pub use realtime::RealtimeScheduler;
#[cfg(feature = "web")]
pub use web::WebScheduler;

/// A callback handed to a [`Scheduler`].
pub type TimerCallback = Box<dyn FnOnce()>;

/// Handle to a scheduled callback, used to cancel it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    /// Wrap a scheduler-specific raw handle.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The scheduler-specific raw handle.
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Single-threaded deferred-callback scheduler.
///
/// Implementations must never invoke a callback synchronously from inside
/// [`schedule`](Self::schedule), and must not invoke a callback after it has
/// been cancelled.
pub trait Scheduler {
    /// Monotonic time since the scheduler's epoch.
    fn now(&self) -> Duration;

    /// Run `callback` once, `delay` after [`now`](Self::now).
    fn schedule(&self, delay: Duration, callback: TimerCallback) -> TimerId;

    /// Cancel a pending callback. Unknown or already-fired ids are ignored.
    fn cancel(&self, timer: TimerId);
}

impl<S: Scheduler + ?Sized> Scheduler for Rc<S> {
    fn now(&self) -> Duration {
        (**self).now()
    }

    fn schedule(&self, delay: Duration, callback: TimerCallback) -> TimerId {
        (**self).schedule(delay, callback)
    }

    fn cancel(&self, timer: TimerId) {
        (**self).cancel(timer);
    }
}
