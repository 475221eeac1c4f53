//! Scripted timelines, progress projection and transition curves.

pub mod path;
pub mod presets;
pub mod scrubber;
pub mod sequence;
pub mod timeline;
pub mod transition;

pub use path::ConnectionPath;
pub use scrubber::{format_timecode, remap, Interval, Scrubber, Segment, Track};
pub use sequence::{Position, Sequence, Step};
pub use timeline::{
    Phase, SequenceTimeline, StepActivation, TimelineObserver, TimelineState,
};
pub use transition::{Transition, TransitionKind};
