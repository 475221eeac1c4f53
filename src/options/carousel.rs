use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::animation::TransitionKind;
use crate::carousel::Breakpoints;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Carousel", inline)]
#[serde(default)]
/// Feature carousel paging and motion.
pub struct CarouselOptions {
    /// Page size before the first viewport measurement.
    #[schemars(
        title = "Items per Page",
        range(min = 1, max = 6),
        extend("step" = 1)
    )]
    pub items_per_page: usize,
    /// Viewport width → page size table.
    pub breakpoints: Breakpoints,
    /// Curve the track follows between pages.
    #[schemars(skip)]
    pub transition: TransitionKind,
}

impl Default for CarouselOptions {
    fn default() -> Self {
        Self {
            items_per_page: 1,
            breakpoints: Breakpoints::default(),
            transition: TransitionKind::CAROUSEL_SPRING,
        }
    }
}
