//! Shared helpers.

pub mod easing;
