use std::fmt;
use std::time::Duration;

use web_time::Instant;

use super::{ManualScheduler, Scheduler, TimerCallback, TimerId};

/// Wall-clock scheduler for hosts that own a frame loop.
///
/// Callbacks are held in a [`ManualScheduler`]; each call to
/// [`pump`](Self::pump) catches virtual time up with the monotonic clock and
/// fires whatever came due. Timing resolution is therefore one frame.
#[derive(Clone)]
pub struct RealtimeScheduler {
    epoch: Instant,
    inner: ManualScheduler,
}

impl RealtimeScheduler {
    /// Start the clock now.
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
            inner: ManualScheduler::new(),
        }
    }

    /// Fire every callback due by the current wall-clock time.
    ///
    /// Returns the time the clock was advanced to.
    pub fn pump(&self) -> Duration {
        let target = self.epoch.elapsed();
        self.inner.advance_to(target);
        target
    }

    /// Number of callbacks waiting to fire.
    pub fn pending(&self) -> usize {
        self.inner.pending()
    }
}

impl Default for RealtimeScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for RealtimeScheduler {
    fn now(&self) -> Duration {
        self.inner.now()
    }

    fn schedule(&self, delay: Duration, callback: TimerCallback) -> TimerId {
        self.inner.schedule(delay, callback)
    }

    fn cancel(&self, timer: TimerId) {
        self.inner.cancel(timer);
    }
}

impl fmt::Debug for RealtimeScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RealtimeScheduler")
            .field("now", &self.inner.now())
            .field("pending", &self.inner.pending())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn pump_fires_elapsed_callbacks() {
        let clock = RealtimeScheduler::new();
        let fired = Rc::new(Cell::new(false));
        let fired_cb = Rc::clone(&fired);
        let _ = clock
            .schedule(Duration::ZERO, Box::new(move || fired_cb.set(true)));

        assert!(!fired.get());
        let _ = clock.pump();
        assert!(fired.get());
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn far_future_callback_stays_pending() {
        let clock = RealtimeScheduler::new();
        let _ = clock.schedule(Duration::from_secs(3600), Box::new(|| {}));
        let now = clock.pump();
        assert!(now < Duration::from_secs(3600));
        assert_eq!(clock.pending(), 1);
    }
}
