//! Built-in sequences and layouts for the landing-page sections.

use std::time::Duration;

use glam::Vec2;

use super::path::ConnectionPath;
use super::scrubber::{Interval, Scrubber, Track};
use super::sequence::Sequence;
use super::transition::TransitionKind;
use crate::error::ConfigurationError;

/// Names accepted by [`sequence`].
pub const SEQUENCE_PRESETS: &[&str] =
    &["deployment_pipeline", "debugger_replay"];

/// Repeat period of the workflow-engine diagram.
pub const WORKFLOW_CYCLE: Duration = Duration::from_millis(4500);

/// Local → git → build → deploy, holding longest on the deployed state.
pub fn deployment_pipeline() -> Result<Sequence, ConfigurationError> {
    Sequence::looping(&[
        ("local", 1500),
        ("git", 1500),
        ("build", 1500),
        ("deploy", 3000),
    ])
}

/// Debugger replay phases, aligned with [`debugger_scrubber`].
///
/// `fixed` covers both the final replay and the hold before the scrubber
/// snaps back to zero, so the step ids match the debugger's four play states.
pub fn debugger_replay() -> Result<Sequence, ConfigurationError> {
    Sequence::looping(&[
        ("playing", 3000),
        ("error", 1500),
        ("rewinding", 1500),
        ("fixed", 6000),
    ])
}

/// Scrubber position (percent of the recording) during a debugger replay.
pub fn debugger_scrubber() -> Track {
    Track::new(0.0)
        .tween(60.0, Duration::from_secs(3), TransitionKind::Linear)
        .hold(Duration::from_millis(1500))
        .tween(30.0, Duration::from_secs(1), TransitionKind::EaseInOut)
        .hold(Duration::from_millis(500))
        .tween(100.0, Duration::from_secs(4), TransitionKind::Linear)
        .hold(Duration::from_secs(2))
        .looped()
}

/// Span of recording time the debugger scrubber covers.
pub const DEBUGGER_RECORDING: Duration = Duration::from_millis(2500);

/// Particle progress along each workflow connector.
pub fn workflow_engine() -> Result<Scrubber, ConfigurationError> {
    let fan_out = Interval::from_secs(1.5, 1.5);
    Scrubber::cyclic(WORKFLOW_CYCLE)
        .with_interval("ingest", Interval::from_secs(0.0, 1.5))?
        .with_interval("fan_out_top", fan_out)?
        .with_interval("fan_out_bottom", fan_out)
}

/// Connector geometry for the workflow diagram, keyed like
/// [`workflow_engine`]'s intervals. Coordinates are percentages of the
/// diagram box.
pub fn workflow_paths() -> [(&'static str, ConnectionPath); 3] {
    let hub = Vec2::new(40.0, 50.0);
    [
        (
            "ingest",
            ConnectionPath::straight(Vec2::new(15.0, 50.0), hub),
        ),
        (
            "fan_out_top",
            ConnectionPath::curved(hub, Vec2::new(75.0, 30.0)),
        ),
        (
            "fan_out_bottom",
            ConnectionPath::curved(hub, Vec2::new(75.0, 70.0)),
        ),
    ]
}

/// Built-in sequence by name.
pub fn sequence(name: &str) -> Result<Sequence, ConfigurationError> {
    match name {
        "deployment_pipeline" => deployment_pipeline(),
        "debugger_replay" => debugger_replay(),
        other => Err(ConfigurationError::UnknownPreset(other.to_owned())),
    }
}
