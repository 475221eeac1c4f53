//! Progress projection from a shared elapsed-time clock.
//!
//! Everything here is a pure function of elapsed time: sampling at the same
//! timestamp always gives the same value, and nothing is mutated while
//! sampling.

use std::time::Duration;

use super::transition::TransitionKind;
use crate::error::ConfigurationError;

/// A window on the global clock mapped onto a value range.
///
/// Before `start` the value is `from`; from `start + duration` on it is `to`;
/// in between it follows the transition curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    /// Offset of the window from the clock origin.
    pub start: Duration,
    /// Length of the window. Zero makes the value jump at `start`.
    pub duration: Duration,
    /// Value at and before `start`.
    pub from: f32,
    /// Value at and after the end of the window.
    pub to: f32,
    /// Curve between the endpoints.
    pub transition: TransitionKind,
}

impl Interval {
    /// Linear 0 → 1 window.
    pub fn new(start: Duration, duration: Duration) -> Self {
        Self {
            start,
            duration,
            from: 0.0,
            to: 1.0,
            transition: TransitionKind::Linear,
        }
    }

    /// Shorthand taking seconds. Negative and NaN inputs become zero;
    /// values past `Duration::MAX` saturate.
    pub fn from_secs(start: f64, duration: f64) -> Self {
        Self::new(secs_saturating(start), secs_saturating(duration))
    }

    /// Map the window onto `from..to` instead of 0..1.
    #[must_use]
    pub fn with_range(mut self, from: f32, to: f32) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    /// Use `transition` between the endpoints.
    #[must_use]
    pub fn with_transition(mut self, transition: TransitionKind) -> Self {
        self.transition = transition;
        self
    }

    /// End of the window.
    pub fn end(&self) -> Duration {
        self.start.saturating_add(self.duration)
    }

    /// Reject non-finite endpoints and broken springs.
    pub fn validate(&self, name: &str) -> Result<(), ConfigurationError> {
        if !self.from.is_finite() || !self.to.is_finite() {
            return Err(ConfigurationError::InvalidInterval {
                name: name.to_owned(),
                reason: "endpoints must be finite",
            });
        }
        self.transition.validate()
    }

    /// Whether `elapsed` falls strictly inside the window.
    pub fn is_active_at(&self, elapsed: Duration) -> bool {
        elapsed > self.start && elapsed < self.end()
    }

    /// Raw linear progress through the window, clamped to [0, 1].
    pub fn progress_at(&self, elapsed: Duration) -> f32 {
        if elapsed <= self.start {
            return if self.duration.is_zero() && elapsed == self.start {
                1.0
            } else {
                0.0
            };
        }
        if elapsed >= self.end() {
            return 1.0;
        }
        let into = elapsed - self.start;
        (into.as_secs_f64() / self.duration.as_secs_f64()) as f32
    }

    /// Interpolated value at `elapsed`.
    pub fn value_at(&self, elapsed: Duration) -> f32 {
        let t = self.progress_at(elapsed);
        if t <= 0.0 {
            return self.from;
        }
        if t >= 1.0 {
            return self.to;
        }
        let eased = self.transition.evaluate(t, self.duration);
        self.from + (self.to - self.from) * eased
    }
}

fn secs_saturating(secs: f64) -> Duration {
    if secs.is_nan() || secs <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
}

/// Named intervals sharing one elapsed-time clock.
///
/// One scrubber position drives any number of overlapping progress bars,
/// each with its own active window.
#[derive(Debug, Clone, Default)]
pub struct Scrubber {
    intervals: Vec<(String, Interval)>,
    period: Option<Duration>,
}

impl Scrubber {
    /// Scrubber with no intervals on a non-repeating clock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scrubber whose clock repeats every `period`.
    ///
    /// A zero period is treated as non-repeating.
    pub fn cyclic(period: Duration) -> Self {
        Self {
            intervals: Vec::new(),
            period: (!period.is_zero()).then_some(period),
        }
    }

    /// Add a named interval.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        interval: Interval,
    ) -> Result<(), ConfigurationError> {
        let name = name.into();
        interval.validate(&name)?;
        if self.intervals.iter().any(|(existing, _)| *existing == name) {
            return Err(ConfigurationError::DuplicateInterval { name });
        }
        self.intervals.push((name, interval));
        Ok(())
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with_interval(
        mut self,
        name: impl Into<String>,
        interval: Interval,
    ) -> Result<Self, ConfigurationError> {
        self.insert(name, interval)?;
        Ok(self)
    }

    /// Interval registered under `name`.
    pub fn interval(&self, name: &str) -> Option<&Interval> {
        self.intervals
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, interval)| interval)
    }

    /// Interval names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.intervals.iter().map(|(name, _)| name.as_str())
    }

    /// Repeat period, if any.
    pub fn period(&self) -> Option<Duration> {
        self.period
    }

    /// Elapsed time folded into one period.
    pub fn local_time(&self, elapsed: Duration) -> Duration {
        match self.period {
            Some(period) => {
                let rem = elapsed.as_nanos() % period.as_nanos();
                Duration::from_nanos(u64::try_from(rem).unwrap_or(u64::MAX))
            }
            None => elapsed,
        }
    }

    /// Value of one interval at `elapsed`.
    pub fn value(&self, name: &str, elapsed: Duration) -> Option<f32> {
        let local = self.local_time(elapsed);
        self.interval(name).map(|interval| interval.value_at(local))
    }

    /// Every interval's value at `elapsed`, in insertion order.
    pub fn project(&self, elapsed: Duration) -> Vec<(&str, f32)> {
        let local = self.local_time(elapsed);
        self.intervals
            .iter()
            .map(|(name, interval)| (name.as_str(), interval.value_at(local)))
            .collect()
    }

    /// Names of intervals whose window contains `elapsed`.
    pub fn active(&self, elapsed: Duration) -> Vec<&str> {
        let local = self.local_time(elapsed);
        self.intervals
            .iter()
            .filter(|(_, interval)| interval.is_active_at(local))
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Latest interval end, i.e. when every value has settled.
    pub fn span(&self) -> Duration {
        self.intervals
            .iter()
            .map(|(_, interval)| interval.end())
            .max()
            .unwrap_or(Duration::ZERO)
    }
}

/// One piece of a [`Track`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    /// Move from the current value to `to`.
    Tween {
        /// Target value.
        to: f32,
        /// Time to get there.
        duration: Duration,
        /// Curve to follow.
        transition: TransitionKind,
    },
    /// Keep the current value.
    Hold {
        /// How long to hold.
        duration: Duration,
    },
}

impl Segment {
    fn duration(&self) -> Duration {
        match *self {
            Segment::Tween { duration, .. } | Segment::Hold { duration } => {
                duration
            }
        }
    }
}

/// Keyframed value path: tweens and holds played back to back.
///
/// A looping track jumps back to its initial value when the last segment
/// ends.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    initial: f32,
    segments: Vec<Segment>,
    looping: bool,
    total: Duration,
}

impl Track {
    /// Track resting at `initial` with no segments.
    pub fn new(initial: f32) -> Self {
        Self {
            initial,
            segments: Vec::new(),
            looping: false,
            total: Duration::ZERO,
        }
    }

    /// Append a tween to `to`.
    #[must_use]
    pub fn tween(
        mut self,
        to: f32,
        duration: Duration,
        transition: TransitionKind,
    ) -> Self {
        self.push(Segment::Tween {
            to,
            duration,
            transition,
        });
        self
    }

    /// Append a hold.
    #[must_use]
    pub fn hold(mut self, duration: Duration) -> Self {
        self.push(Segment::Hold { duration });
        self
    }

    /// Restart from the initial value after the last segment.
    #[must_use]
    pub fn looped(mut self) -> Self {
        self.looping = true;
        self
    }

    fn push(&mut self, segment: Segment) {
        self.total = self.total.saturating_add(segment.duration());
        self.segments.push(segment);
    }

    /// Reject non-finite values and broken springs.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !self.initial.is_finite() {
            return Err(ConfigurationError::InvalidInterval {
                name: "initial".to_owned(),
                reason: "track values must be finite",
            });
        }
        for (index, segment) in self.segments.iter().enumerate() {
            if let Segment::Tween { to, transition, .. } = segment {
                if !to.is_finite() {
                    return Err(ConfigurationError::InvalidInterval {
                        name: format!("segment {index}"),
                        reason: "track values must be finite",
                    });
                }
                transition.validate()?;
            }
        }
        Ok(())
    }

    /// Length of one pass through every segment.
    pub fn duration(&self) -> Duration {
        self.total
    }

    /// The segments in playback order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    fn local_time(&self, elapsed: Duration) -> Duration {
        if self.looping && !self.total.is_zero() {
            let rem = elapsed.as_nanos() % self.total.as_nanos();
            Duration::from_nanos(u64::try_from(rem).unwrap_or(u64::MAX))
        } else {
            elapsed
        }
    }

    /// Index of the segment playing at `elapsed`, `None` once a non-looping
    /// track has ended.
    pub fn segment_at(&self, elapsed: Duration) -> Option<usize> {
        let local = self.local_time(elapsed);
        let mut offset = Duration::ZERO;
        for (index, segment) in self.segments.iter().enumerate() {
            offset = offset.saturating_add(segment.duration());
            if local < offset {
                return Some(index);
            }
        }
        None
    }

    /// Value at `elapsed`.
    pub fn sample(&self, elapsed: Duration) -> f32 {
        let local = self.local_time(elapsed);
        let mut value = self.initial;
        let mut offset = Duration::ZERO;

        for segment in &self.segments {
            let end = offset.saturating_add(segment.duration());
            if let Segment::Tween {
                to,
                duration,
                transition,
            } = *segment
            {
                if local < end {
                    let into = local.saturating_sub(offset);
                    let t = (into.as_secs_f64() / duration.as_secs_f64())
                        as f32;
                    return value
                        + (to - value) * transition.evaluate(t, duration);
                }
                value = to;
            } else if local < end {
                return value;
            }
            offset = end;
        }
        value
    }
}

/// Map `value` from one range onto another, clamped to the source range.
///
/// A degenerate source range maps everything to the start of the target.
pub fn remap(value: f32, from: (f32, f32), to: (f32, f32)) -> f32 {
    let span = from.1 - from.0;
    if span == 0.0 {
        return to.0;
    }
    let t = ((value - from.0) / span).clamp(0.0, 1.0);
    to.0 + (to.1 - to.0) * t
}

/// Format a duration as `MM:SS.mmm`.
pub fn format_timecode(time: Duration) -> String {
    let total_ms = time.as_millis();
    let minutes = total_ms / 60_000;
    let seconds = (total_ms / 1000) % 60;
    let millis = total_ms % 1000;
    format!("{minutes:02}:{seconds:02}.{millis:03}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: f64) -> Duration {
        Duration::from_secs_f64(s)
    }

    #[test]
    fn interval_scenario_values() {
        let interval = Interval::from_secs(1.5, 1.5);
        assert_eq!(interval.value_at(secs(1.5)), 0.0);
        assert_eq!(interval.value_at(secs(2.25)), 0.5);
        assert_eq!(interval.value_at(secs(3.0)), 1.0);
        assert_eq!(interval.value_at(secs(5.0)), 1.0);
        assert_eq!(interval.value_at(Duration::ZERO), 0.0);
    }

    #[test]
    fn interval_clamps_to_custom_range() {
        let interval =
            Interval::from_secs(1.0, 2.0).with_range(60.0, 30.0);
        assert_eq!(interval.value_at(secs(0.5)), 60.0);
        assert_eq!(interval.value_at(secs(2.0)), 45.0);
        assert_eq!(interval.value_at(secs(9.0)), 30.0);
    }

    #[test]
    fn interval_is_monotonic_between_endpoints() {
        for transition in [TransitionKind::Linear, TransitionKind::EaseInOut] {
            let interval =
                Interval::from_secs(0.5, 2.0).with_transition(transition);
            let mut last = interval.value_at(Duration::ZERO);
            for ms in (0..3000).step_by(10) {
                let v = interval.value_at(Duration::from_millis(ms));
                assert!(v + 1e-5 >= last, "{transition:?} at {ms}ms");
                last = v;
            }
            assert_eq!(last, 1.0);
        }
    }

    #[test]
    fn spring_interval_still_hits_endpoints() {
        let interval = Interval::from_secs(1.0, 0.7)
            .with_transition(TransitionKind::CAROUSEL_SPRING);
        assert_eq!(interval.value_at(secs(1.0)), 0.0);
        assert_eq!(interval.value_at(secs(1.7)), 1.0);
    }

    #[test]
    fn zero_length_interval_jumps_at_start() {
        let interval = Interval::from_secs(2.0, 0.0);
        assert_eq!(interval.value_at(secs(1.999)), 0.0);
        assert_eq!(interval.value_at(secs(2.0)), 1.0);
    }

    #[test]
    fn out_of_range_seconds_saturate() {
        let far = Interval::from_secs(f64::INFINITY, 1.0);
        assert_eq!(far.start, Duration::MAX);
        assert_eq!(far.end(), Duration::MAX);
        assert_eq!(far.value_at(secs(10.0)), 0.0);

        let odd = Interval::from_secs(f64::NAN, -3.0);
        assert_eq!(odd.start, Duration::ZERO);
        assert_eq!(odd.duration, Duration::ZERO);

        let long = Interval::new(Duration::MAX, Duration::from_secs(5));
        assert_eq!(long.end(), Duration::MAX);
    }

    #[test]
    fn scrubber_projects_overlapping_windows() {
        let scrubber = Scrubber::new()
            .with_interval("ingest", Interval::from_secs(0.0, 1.5))
            .unwrap()
            .with_interval("top", Interval::from_secs(1.5, 1.5))
            .unwrap()
            .with_interval("bottom", Interval::from_secs(1.5, 1.5))
            .unwrap();

        let values = scrubber.project(secs(2.25));
        assert_eq!(
            values,
            vec![("ingest", 1.0), ("top", 0.5), ("bottom", 0.5)]
        );
        assert_eq!(scrubber.active(secs(0.75)), vec!["ingest"]);
        assert_eq!(scrubber.span(), secs(3.0));
        assert_eq!(scrubber.value("missing", secs(1.0)), None);
    }

    #[test]
    fn scrubber_rejects_duplicates_and_bad_values() {
        let mut scrubber = Scrubber::new();
        scrubber.insert("a", Interval::from_secs(0.0, 1.0)).unwrap();
        assert!(matches!(
            scrubber.insert("a", Interval::from_secs(1.0, 1.0)),
            Err(ConfigurationError::DuplicateInterval { .. })
        ));
        assert!(matches!(
            scrubber.insert(
                "nan",
                Interval::from_secs(0.0, 1.0).with_range(f32::NAN, 1.0)
            ),
            Err(ConfigurationError::InvalidInterval { .. })
        ));
        assert_eq!(scrubber.names().collect::<Vec<_>>(), vec!["a"]);
    }

    #[test]
    fn cyclic_scrubber_repeats() {
        let scrubber = Scrubber::cyclic(secs(4.5))
            .with_interval("top", Interval::from_secs(1.5, 1.5))
            .unwrap();
        assert_eq!(scrubber.value("top", secs(2.25)), Some(0.5));
        assert_eq!(scrubber.value("top", secs(6.75)), Some(0.5));
        assert_eq!(scrubber.value("top", secs(4.6)), Some(0.0));
        assert_eq!(scrubber.local_time(secs(9.0)), Duration::ZERO);
    }

    fn debugger_track() -> Track {
        Track::new(0.0)
            .tween(60.0, secs(3.0), TransitionKind::Linear)
            .hold(secs(1.5))
            .tween(30.0, secs(1.0), TransitionKind::EaseInOut)
            .hold(secs(0.5))
            .tween(100.0, secs(4.0), TransitionKind::Linear)
            .hold(secs(2.0))
            .looped()
    }

    #[test]
    fn track_follows_segments() {
        let track = debugger_track();
        assert_eq!(track.duration(), secs(12.0));
        assert_eq!(track.sample(Duration::ZERO), 0.0);
        assert!((track.sample(secs(1.5)) - 30.0).abs() < 1e-4);
        assert_eq!(track.sample(secs(3.5)), 60.0);
        assert!((track.sample(secs(5.0)) - 45.0).abs() < 0.01);
        assert_eq!(track.sample(secs(5.75)), 30.0);
        assert!((track.sample(secs(8.0)) - 65.0).abs() < 1e-3);
        assert_eq!(track.sample(secs(11.0)), 100.0);
    }

    #[test]
    fn looping_track_resets_to_initial() {
        let track = debugger_track();
        assert_eq!(track.sample(secs(12.0)), 0.0);
        assert!((track.sample(secs(13.5)) - 30.0).abs() < 1e-4);
        assert_eq!(track.segment_at(secs(12.1)), Some(0));
        assert_eq!(track.segment_at(secs(4.0)), Some(1));
    }

    #[test]
    fn finished_track_holds_last_value() {
        let track =
            Track::new(5.0).tween(10.0, secs(1.0), TransitionKind::Linear);
        assert_eq!(track.sample(secs(3.0)), 10.0);
        assert_eq!(track.segment_at(secs(3.0)), None);
        assert!(track.validate().is_ok());
        assert!(Track::new(f32::INFINITY).validate().is_err());
    }

    #[test]
    fn remap_clamps_and_scales() {
        assert_eq!(remap(60.0, (0.0, 100.0), (0.0, 2.5)), 1.5);
        assert_eq!(remap(-10.0, (0.0, 100.0), (0.0, 2.5)), 0.0);
        assert_eq!(remap(150.0, (0.0, 100.0), (0.0, 2.5)), 2.5);
        assert_eq!(remap(3.0, (1.0, 1.0), (7.0, 9.0)), 7.0);
    }

    #[test]
    fn timecode_formatting() {
        assert_eq!(format_timecode(Duration::ZERO), "00:00.000");
        assert_eq!(format_timecode(Duration::from_millis(2500)), "00:02.500");
        assert_eq!(format_timecode(Duration::from_millis(61_005)), "01:01.005");
    }
}
