use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Timeline", inline)]
#[serde(default)]
/// Defaults shared by every scripted timeline.
pub struct TimelineOptions {
    /// Looping flag for sequences that don't set their own.
    #[schemars(title = "Loop by Default")]
    pub looping: bool,
    /// Interval between host animation frames in milliseconds.
    #[schemars(
        title = "Frame Interval",
        range(min = 1, max = 1000),
        extend("step" = 1)
    )]
    pub frame_ms: u64,
}

impl TimelineOptions {
    /// Frame interval as a duration, never zero.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_ms.max(1))
    }
}

impl Default for TimelineOptions {
    fn default() -> Self {
        Self {
            looping: true,
            frame_ms: 16,
        }
    }
}
