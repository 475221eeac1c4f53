use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// One responsive tier: from `min_width` up, show `items_per_page` cards.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct Breakpoint {
    /// Smallest viewport width (px) this tier applies to.
    pub min_width: u32,
    /// Cards visible at once.
    pub items_per_page: usize,
    /// Card width as a percentage of the track.
    pub basis_percent: f32,
}

/// Viewport width → page size lookup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Breakpoints", inline)]
#[serde(default)]
pub struct Breakpoints {
    /// Tiers in any order; the widest matching one wins.
    pub tiers: Vec<Breakpoint>,
    /// Page size below every tier.
    #[schemars(range(min = 1))]
    pub fallback: usize,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            tiers: vec![
                Breakpoint {
                    min_width: 1280,
                    items_per_page: 3,
                    basis_percent: 32.0,
                },
                Breakpoint {
                    min_width: 768,
                    items_per_page: 2,
                    basis_percent: 48.0,
                },
            ],
            fallback: 1,
        }
    }
}

impl Breakpoints {
    /// Reject tiers that would show no cards.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.fallback == 0
            || self.tiers.iter().any(|t| t.items_per_page == 0)
        {
            return Err(ConfigurationError::ZeroItemsPerPage);
        }
        Ok(())
    }

    fn tier_for(&self, width: u32) -> Option<&Breakpoint> {
        self.tiers
            .iter()
            .filter(|tier| width >= tier.min_width)
            .max_by_key(|tier| tier.min_width)
    }

    /// Page size for a viewport `width` px wide.
    pub fn items_per_page(&self, width: u32) -> usize {
        self.tier_for(width)
            .map_or(self.fallback, |tier| tier.items_per_page)
            .max(1)
    }

    /// Card width (percent of the track) for a viewport `width` px wide.
    pub fn basis_percent(&self, width: u32) -> f32 {
        self.tier_for(width).map_or(100.0, |tier| tier.basis_percent)
    }
}
