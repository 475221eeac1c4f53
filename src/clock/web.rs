use std::fmt;
use std::time::Duration;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use super::{Scheduler, TimerCallback, TimerId};

/// Browser scheduler backed by `window.setTimeout` and `performance.now()`.
///
/// A callback that is cancelled before it fires keeps its JS closure alive
/// until the page unloads; timelines cancel at most once per step, so this
/// stays bounded in practice.
pub struct WebScheduler {
    window: web_sys::Window,
    performance: web_sys::Performance,
    epoch_ms: f64,
}

impl WebScheduler {
    /// Scheduler bound to the current window, or `None` outside a window
    /// context (e.g. inside a worker).
    pub fn new() -> Option<Self> {
        let window = web_sys::window()?;
        let performance = window.performance()?;
        let epoch_ms = performance.now();
        Some(Self {
            window,
            performance,
            epoch_ms,
        })
    }
}

impl Scheduler for WebScheduler {
    fn now(&self) -> Duration {
        let elapsed_ms = (self.performance.now() - self.epoch_ms).max(0.0);
        Duration::from_secs_f64(elapsed_ms / 1000.0)
    }

    fn schedule(&self, delay: Duration, callback: TimerCallback) -> TimerId {
        let handler = Closure::once_into_js(move || callback());
        let timeout_ms = delay.as_millis().min(i32::MAX as u128) as i32;
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                handler.unchecked_ref(),
                timeout_ms,
            ) {
            Ok(handle) => TimerId::from_raw(u64::from(handle as u32)),
            Err(e) => {
                log::error!("setTimeout failed: {e:?}");
                TimerId::from_raw(0)
            }
        }
    }

    fn cancel(&self, timer: TimerId) {
        // setTimeout never hands out 0, so the failure sentinel is a no-op.
        if timer.raw() != 0 {
            self.window.clear_timeout_with_handle(timer.raw() as i32);
        }
    }
}

impl fmt::Debug for WebScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebScheduler")
            .field("epoch_ms", &self.epoch_ms)
            .finish_non_exhaustive()
    }
}
