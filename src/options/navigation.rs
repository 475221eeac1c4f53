use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Navigation", inline)]
#[serde(default)]
/// Header and menu behavior.
pub struct NavigationOptions {
    /// Scroll offset (px) past which the header condenses.
    #[schemars(
        title = "Scroll Threshold",
        range(min = 0.0, max = 400.0),
        extend("step" = 1.0)
    )]
    pub scroll_threshold: f32,
}

impl Default for NavigationOptions {
    fn default() -> Self {
        Self {
            scroll_threshold: 20.0,
        }
    }
}
