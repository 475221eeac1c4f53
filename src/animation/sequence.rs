//! Validated, immutable step lists and pure position lookup.

use std::time::Duration;

use rustc_hash::FxHashMap;

use crate::error::ConfigurationError;

/// One named phase of a scripted sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Step {
    id: String,
    duration: Duration,
}

impl Step {
    /// Step with the given id and hold duration.
    pub fn new(id: impl Into<String>, duration: Duration) -> Self {
        Self {
            id: id.into(),
            duration,
        }
    }

    /// Shorthand for a step lasting `millis` milliseconds.
    pub fn from_millis(id: impl Into<String>, millis: u64) -> Self {
        Self::new(id, Duration::from_millis(millis))
    }

    /// Step identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// How long the step stays active.
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

/// Where a sequence is at some elapsed time since it started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Completed loops before this one.
    pub cycle: u64,
    /// Index of the active step.
    pub index: usize,
    /// Time spent in the active step, never more than its duration.
    pub elapsed_in_step: Duration,
    /// A non-looping sequence has run past its last step.
    pub finished: bool,
}

/// Ordered, immutable list of steps plus the looping flag.
///
/// Construction rejects empty lists, zero durations, repeated ids and cycles
/// longer than `Duration::MAX`, so every
/// `Sequence` can be driven without runtime checks.
#[derive(Debug, Clone)]
pub struct Sequence {
    steps: Vec<Step>,
    /// Start offset of each step within one cycle.
    offsets: Vec<Duration>,
    total: Duration,
    looping: bool,
    by_id: FxHashMap<String, usize>,
}

impl Sequence {
    /// Validate `steps` and build a sequence.
    pub fn new(
        steps: Vec<Step>,
        looping: bool,
    ) -> Result<Self, ConfigurationError> {
        if steps.is_empty() {
            return Err(ConfigurationError::EmptySequence);
        }

        let mut offsets = Vec::with_capacity(steps.len());
        let mut by_id = FxHashMap::default();
        let mut total = Duration::ZERO;
        for (index, step) in steps.iter().enumerate() {
            if step.duration.is_zero() {
                return Err(ConfigurationError::NonPositiveDuration {
                    step: step.id.clone(),
                });
            }
            if by_id.insert(step.id.clone(), index).is_some() {
                return Err(ConfigurationError::DuplicateStepId {
                    step: step.id.clone(),
                });
            }
            offsets.push(total);
            total = total.checked_add(step.duration).ok_or_else(|| {
                ConfigurationError::SequenceTooLong {
                    step: step.id.clone(),
                }
            })?;
        }

        Ok(Self {
            steps,
            offsets,
            total,
            looping,
            by_id,
        })
    }

    /// Looping sequence from `(id, millis)` pairs.
    pub fn looping(
        steps: &[(&str, u64)],
    ) -> Result<Self, ConfigurationError> {
        Self::new(Self::collect(steps), true)
    }

    /// Play-once sequence from `(id, millis)` pairs.
    pub fn once(steps: &[(&str, u64)]) -> Result<Self, ConfigurationError> {
        Self::new(Self::collect(steps), false)
    }

    fn collect(steps: &[(&str, u64)]) -> Vec<Step> {
        steps
            .iter()
            .map(|&(id, millis)| Step::from_millis(id, millis))
            .collect()
    }

    /// All steps in order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Step at `index`.
    pub fn step(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    /// Number of steps (always at least one).
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false; kept for API symmetry with collections.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Whether the sequence wraps to step 0 after the last step.
    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// Length of one pass through every step.
    pub fn cycle_duration(&self) -> Duration {
        self.total
    }

    /// Offset of step `index` from the start of a cycle.
    pub fn step_start(&self, index: usize) -> Option<Duration> {
        self.offsets.get(index).copied()
    }

    /// Index of the step with the given id.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    /// Position at `elapsed` since the sequence started.
    ///
    /// Step windows are half-open: at exactly a boundary the next step is
    /// already active.
    pub fn locate(&self, elapsed: Duration) -> Position {
        let last = self.steps.len() - 1;

        let (cycle, local) = if self.looping {
            let total_ns = self.total.as_nanos();
            let elapsed_ns = elapsed.as_nanos();
            let cycle =
                u64::try_from(elapsed_ns / total_ns).unwrap_or(u64::MAX);
            let rem_ns =
                u64::try_from(elapsed_ns % total_ns).unwrap_or(u64::MAX);
            (cycle, Duration::from_nanos(rem_ns))
        } else if elapsed >= self.total {
            return Position {
                cycle: 0,
                index: last,
                elapsed_in_step: self.steps[last].duration,
                finished: true,
            };
        } else {
            (0, elapsed)
        };

        // First offset is zero, so the partition point is at least 1.
        let index = self
            .offsets
            .partition_point(|&offset| offset <= local)
            .saturating_sub(1);
        Position {
            cycle,
            index,
            elapsed_in_step: local - self.offsets[index],
            finished: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ab_looping() -> Sequence {
        Sequence::looping(&[("a", 1000), ("b", 1000)]).unwrap()
    }

    #[test]
    fn empty_sequence_is_rejected() {
        assert_eq!(
            Sequence::new(Vec::new(), true).unwrap_err(),
            ConfigurationError::EmptySequence
        );
    }

    #[test]
    fn zero_duration_names_the_step() {
        let err = Sequence::once(&[("a", 100), ("b", 0)]).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::NonPositiveDuration {
                step: "b".to_owned()
            }
        );
    }

    #[test]
    fn overflowing_cycle_names_the_step() {
        let steps = vec![
            Step::new("a", Duration::MAX),
            Step::from_millis("b", 1000),
        ];
        assert_eq!(
            Sequence::new(steps, true).unwrap_err(),
            ConfigurationError::SequenceTooLong {
                step: "b".to_owned()
            }
        );
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = Sequence::once(&[("a", 100), ("a", 100)]).unwrap_err();
        assert!(matches!(err, ConfigurationError::DuplicateStepId { .. }));
    }

    #[test]
    fn offsets_and_total() {
        let seq = Sequence::looping(&[
            ("local", 1500),
            ("git", 1500),
            ("deploy", 3000),
        ])
        .unwrap();
        assert_eq!(seq.cycle_duration(), Duration::from_millis(6000));
        assert_eq!(seq.step_start(2), Some(Duration::from_millis(3000)));
        assert_eq!(seq.index_of("git"), Some(1));
        assert_eq!(seq.index_of("missing"), None);
        assert!(!seq.is_empty());
    }

    #[test]
    fn locate_wraps_looping_sequence() {
        let seq = ab_looping();
        let pos = seq.locate(Duration::from_millis(2500));
        assert_eq!(pos.cycle, 1);
        assert_eq!(pos.index, 0);
        assert_eq!(pos.elapsed_in_step, Duration::from_millis(500));
        assert!(!pos.finished);
    }

    #[test]
    fn locate_boundary_belongs_to_next_step() {
        let seq = ab_looping();
        assert_eq!(seq.locate(Duration::from_millis(999)).index, 0);
        assert_eq!(seq.locate(Duration::from_millis(1000)).index, 1);
        let wrapped = seq.locate(Duration::from_millis(2000));
        assert_eq!((wrapped.cycle, wrapped.index), (1, 0));
        assert_eq!(wrapped.elapsed_in_step, Duration::ZERO);
    }

    #[test]
    fn locate_finishes_play_once_sequence() {
        let seq = Sequence::once(&[("a", 1000), ("b", 500)]).unwrap();
        let pos = seq.locate(Duration::from_secs(10));
        assert!(pos.finished);
        assert_eq!(pos.index, 1);
        assert_eq!(pos.elapsed_in_step, Duration::from_millis(500));
    }

    #[test]
    fn elapsed_never_exceeds_step_duration() {
        let seq = Sequence::looping(&[("x", 70), ("y", 130), ("z", 50)])
            .unwrap();
        for ms in (0..2000).step_by(7) {
            let pos = seq.locate(Duration::from_millis(ms));
            let step = seq.step(pos.index).unwrap();
            assert!(pos.elapsed_in_step < step.duration());
        }
    }
}
