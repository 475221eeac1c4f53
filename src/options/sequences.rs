use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::animation::{Sequence, Step};
use crate::error::ConfigurationError;

/// One step of a user-defined sequence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct StepOptions {
    /// Step identifier, unique within the sequence.
    pub id: String,
    /// How long the step stays active, in milliseconds.
    #[schemars(range(min = 1))]
    pub duration_ms: u64,
}

/// A `[sequences.<name>]` table.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema,
)]
#[serde(default)]
pub struct SequenceOptions {
    /// Wrap to the first step after the last. Falls back to
    /// `[timeline] looping` when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub looping: Option<bool>,
    /// Steps in playback order.
    pub steps: Vec<StepOptions>,
}

impl SequenceOptions {
    /// Validate into a [`Sequence`].
    pub fn to_sequence(
        &self,
        default_looping: bool,
    ) -> Result<Sequence, ConfigurationError> {
        let steps = self
            .steps
            .iter()
            .map(|step| Step::from_millis(step.id.clone(), step.duration_ms))
            .collect();
        Sequence::new(steps, self.looping.unwrap_or(default_looping))
    }
}

impl From<&Sequence> for SequenceOptions {
    fn from(sequence: &Sequence) -> Self {
        Self {
            looping: Some(sequence.is_looping()),
            steps: sequence
                .steps()
                .iter()
                .map(|step| StepOptions {
                    id: step.id().to_owned(),
                    duration_ms: u64::try_from(step.duration().as_millis())
                        .unwrap_or(u64::MAX),
                })
                .collect(),
        }
    }
}
