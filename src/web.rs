//! Browser bindings.
//!
//! Exposes preset timelines to JavaScript, driven by `setTimeout` through
//! [`WebScheduler`](crate::clock::WebScheduler).

use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen::JsValue;

use crate::animation::{presets, SequenceTimeline, StepActivation};
use crate::clock::WebScheduler;

/// Route panics and `log` output to the browser console.
///
/// Safe to call more than once; later calls keep the first logger.
#[wasm_bindgen(js_name = installHooks)]
pub fn install_hooks() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::debug!("console logger already installed");
    }
}

/// A preset timeline that reports step changes to a JS callback.
#[wasm_bindgen]
pub struct JsTimeline {
    inner: SequenceTimeline,
}

#[wasm_bindgen]
impl JsTimeline {
    /// Timeline for the named preset. `on_step` is called as
    /// `on_step(index, id)` whenever a step activates.
    #[wasm_bindgen(constructor)]
    pub fn new(
        preset: &str,
        on_step: js_sys::Function,
    ) -> Result<Self, JsValue> {
        let sequence = presets::sequence(preset)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let scheduler = WebScheduler::new()
            .ok_or_else(|| JsValue::from_str("no window available"))?;
        let inner = SequenceTimeline::new(sequence, scheduler).with_observer(
            move |activation: &StepActivation| {
                let index = JsValue::from(activation.index as u32);
                let id = JsValue::from_str(&activation.id);
                if let Err(e) = on_step.call2(&JsValue::NULL, &index, &id) {
                    log::warn!("step callback threw: {e:?}");
                }
            },
        );
        Ok(Self { inner })
    }

    /// Start, or restart, from the first step.
    pub fn start(&self) {
        self.inner.start();
    }

    /// Stop all pending step changes.
    pub fn cancel(&self) {
        self.inner.cancel();
    }

    /// Whether step `index` is reached or passed.
    #[wasm_bindgen(js_name = isActive)]
    pub fn is_active(&self, index: usize) -> bool {
        self.inner.is_active(index)
    }

    /// Index of the current step.
    #[wasm_bindgen(js_name = currentIndex)]
    pub fn current_index(&self) -> usize {
        self.inner.current_index()
    }

    /// Progress through the current step, for requestAnimationFrame loops.
    pub fn tick(&self) -> Option<f32> {
        self.inner.tick()
    }
}
