// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![warn(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Headless choreography for scripted landing-page animations.
//!
//! Storyline drives the "scripted state timelines" of an animated marketing
//! page: a deployment pipeline that steps through stages, a debugger replay
//! whose scrubber rewinds and replays, a workflow diagram whose particles
//! travel connectors during fixed windows, and a paginated feature carousel.
//! Rendering is left to the host; this crate only decides *which* state is
//! showing and *how far along* each transition is.
//!
//! # Key entry points
//!
//! - [`animation::SequenceTimeline`] - timer-driven step sequencer with
//!   observer callbacks
//! - [`animation::Scrubber`] / [`animation::Track`] - pure projections from
//!   elapsed time to interpolated values
//! - [`carousel::Paginator`] - clamped carousel paging with responsive page
//!   sizes
//! - [`navigation`] - scroll lock, mobile menu and condensed header state
//! - [`options::Options`] - TOML configuration and user-defined sequences
//!
//! # Time
//!
//! Every timer goes through the [`clock::Scheduler`] trait. Tests and
//! frame-driven hosts use [`clock::ManualScheduler`]; native hosts can pump a
//! [`clock::RealtimeScheduler`] from their event loop; browsers use the
//! `web` feature's `setTimeout`-backed scheduler.

pub mod animation;
pub mod carousel;
pub mod clock;
pub mod error;
pub mod navigation;
pub mod options;
pub mod util;
#[cfg(feature = "web")]
pub mod web;

pub use error::{ConfigurationError, StorylineError};
