//! Crate-level error types.

use std::fmt;

/// A timeline, scrubber or paginator was configured with values it cannot
/// animate.
///
/// Raised synchronously when a primitive is built or reconfigured, never in
/// the middle of a running sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// A sequence needs at least one step.
    EmptySequence,
    /// A step was given a zero duration.
    NonPositiveDuration {
        /// Id of the offending step.
        step: String,
    },
    /// Two steps in one sequence share an id.
    DuplicateStepId {
        /// The repeated id.
        step: String,
    },
    /// The step durations add up to more than `Duration` can hold.
    SequenceTooLong {
        /// Id of the step that overflowed the cycle length.
        step: String,
    },
    /// A paginator cannot show zero items per page.
    ZeroItemsPerPage,
    /// A scrubber interval or track segment has unusable values.
    InvalidInterval {
        /// Name of the interval (or track segment index).
        name: String,
        /// What is wrong with it.
        reason: &'static str,
    },
    /// Two scrubber intervals share a name.
    DuplicateInterval {
        /// The repeated name.
        name: String,
    },
    /// Spring parameters must be finite and positive.
    InvalidSpring,
    /// No built-in or configured sequence has this name.
    UnknownPreset(String),
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySequence => write!(f, "sequence has no steps"),
            Self::NonPositiveDuration { step } => {
                write!(f, "step '{step}' must have a positive duration")
            }
            Self::DuplicateStepId { step } => {
                write!(f, "step id '{step}' appears more than once")
            }
            Self::SequenceTooLong { step } => {
                write!(
                    f,
                    "sequence overflows its cycle length at step '{step}'"
                )
            }
            Self::ZeroItemsPerPage => {
                write!(f, "items per page must be at least 1")
            }
            Self::InvalidInterval { name, reason } => {
                write!(f, "interval '{name}': {reason}")
            }
            Self::DuplicateInterval { name } => {
                write!(f, "interval '{name}' is already defined")
            }
            Self::InvalidSpring => write!(
                f,
                "spring stiffness, damping and mass must be finite and positive"
            ),
            Self::UnknownPreset(name) => {
                write!(f, "unknown sequence preset '{name}'")
            }
        }
    }
}

impl std::error::Error for ConfigurationError {}

/// Errors produced by the storyline crate.
#[derive(Debug)]
pub enum StorylineError {
    /// Invalid timeline, scrubber or paginator configuration.
    Configuration(ConfigurationError),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML/JSON options parsing or serialization failure.
    OptionsParse(String),
}

impl fmt::Display for StorylineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration(e) => write!(f, "configuration error: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
        }
    }
}

impl std::error::Error for StorylineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Configuration(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::OptionsParse(_) => None,
        }
    }
}

impl From<ConfigurationError> for StorylineError {
    fn from(e: ConfigurationError) -> Self {
        Self::Configuration(e)
    }
}

impl From<std::io::Error> for StorylineError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
