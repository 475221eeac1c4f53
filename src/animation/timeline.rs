//! Scheduler-driven step timeline.
//!
//! [`SequenceTimeline`] walks a [`Sequence`] one step at a time. Each step
//! activation schedules exactly one timer for the next transition, so at most
//! one callback is ever pending per instance. Observers are notified
//! synchronously, after the new state has been applied.
//!
//! Teardown is the important path: [`cancel`](SequenceTimeline::cancel) and
//! `Drop` both guarantee that no timer callback mutates the instance or
//! reaches the observer afterward. A generation counter backs this up for
//! schedulers that cannot retract a timer that has already been dequeued.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};
use std::time::Duration;

use super::sequence::{Sequence, Step};
use crate::clock::{Scheduler, TimerId};

/// Emitted when a step becomes active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepActivation {
    /// Index of the activated step.
    pub index: usize,
    /// Id of the activated step.
    pub id: String,
    /// Scheduler time of the activation.
    pub timestamp: Duration,
    /// Number of completed loops before this activation.
    pub cycle: u64,
}

/// Receives timeline notifications.
///
/// Closures taking `&StepActivation` implement this trait directly.
pub trait TimelineObserver {
    /// A step became active.
    fn on_step_change(&mut self, activation: &StepActivation);

    /// Progress of the active step in [0, 1], reported by
    /// [`SequenceTimeline::tick`]. Never decreases within a step.
    fn on_progress(&mut self, _value: f32) {}

    /// A play-once timeline finished its last step.
    fn on_complete(&mut self, _timestamp: Duration) {}
}

impl<F: FnMut(&StepActivation)> TimelineObserver for F {
    fn on_step_change(&mut self, activation: &StepActivation) {
        self(activation);
    }
}

/// Lifecycle phase of a timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Not started, or cancelled.
    #[default]
    Idle,
    /// Advancing through steps.
    Running,
    /// Stopped mid-step; [`SequenceTimeline::resume`] continues it.
    Paused,
    /// A play-once timeline ran past its last step.
    Completed,
}

/// Snapshot of a timeline at the scheduler's current time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineState {
    /// Index of the current step.
    pub current_step_index: usize,
    /// Time spent in the current step, never more than its duration.
    pub elapsed_in_step: Duration,
    /// Whether a transition is pending.
    pub running: bool,
    /// Completed loops since the last start.
    pub cycle: u64,
}

enum Notice {
    Step(StepActivation),
    Progress(f32),
    Complete(Duration),
}

#[derive(Default)]
struct Core {
    phase: Phase,
    index: usize,
    cycle: u64,
    /// Scheduler time at which the current step started.
    step_started_at: Duration,
    /// Elapsed time held while not running.
    held_elapsed: Duration,
    pending: Option<TimerId>,
    /// Bumped on every start/cancel/pause; stale timers compare against it.
    generation: u64,
    last_progress: f32,
}

struct Shared {
    sequence: Sequence,
    scheduler: Rc<dyn Scheduler>,
    core: RefCell<Core>,
    observer: RefCell<Option<Box<dyn TimelineObserver>>>,
    /// Bumped whenever the observer is replaced, including mid-dispatch.
    observer_epoch: Cell<u64>,
    outbox: RefCell<VecDeque<Notice>>,
    dispatching: Cell<bool>,
}

/// Drives a [`Sequence`] through its steps on an injected [`Scheduler`].
///
/// State machine: `Idle -> Running -> (step)* -> Idle | Completed`, with
/// `Paused` reachable from `Running`. Stepping between two adjacent steps is
/// an event, not a held state.
pub struct SequenceTimeline {
    shared: Rc<Shared>,
}

impl SequenceTimeline {
    /// Timeline over `sequence`, idle until [`start`](Self::start).
    pub fn new(
        sequence: Sequence,
        scheduler: impl Scheduler + 'static,
    ) -> Self {
        Self {
            shared: Rc::new(Shared {
                sequence,
                scheduler: Rc::new(scheduler),
                core: RefCell::new(Core::default()),
                observer: RefCell::new(None),
                observer_epoch: Cell::new(0),
                outbox: RefCell::new(VecDeque::new()),
                dispatching: Cell::new(false),
            }),
        }
    }

    /// Builder form of [`set_observer`](Self::set_observer).
    pub fn with_observer(
        self,
        observer: impl TimelineObserver + 'static,
    ) -> Self {
        self.set_observer(observer);
        self
    }

    /// Register the observer, replacing any previous one.
    pub fn set_observer(&self, observer: impl TimelineObserver + 'static) {
        self.shared.replace_observer(Some(Box::new(observer)));
    }

    /// Drop the registered observer.
    pub fn clear_observer(&self) {
        self.shared.replace_observer(None);
    }

    /// Activate step 0 now and begin scheduling transitions.
    ///
    /// Restarts from step 0 if already running; the previous pending
    /// transition is dropped.
    pub fn start(&self) {
        let now = self.shared.scheduler.now();
        {
            let mut core = self.shared.core.borrow_mut();
            self.shared.retract(&mut core);
            core.phase = Phase::Running;
            core.cycle = 0;
        }
        log::info!(
            "timeline start: {} steps, looping={}",
            self.shared.sequence.len(),
            self.shared.sequence.is_looping()
        );
        self.shared.activate(0, now);
    }

    /// Halt all pending transitions.
    ///
    /// Idempotent and safe from any phase. No timer callback touches the
    /// timeline after this returns. A completed timeline stays completed.
    pub fn cancel(&self) {
        let now = self.shared.scheduler.now();
        let mut core = self.shared.core.borrow_mut();
        if core.phase == Phase::Running {
            core.held_elapsed = self.shared.elapsed_in_step(&core, now);
            core.phase = Phase::Idle;
            log::debug!("timeline cancelled at step {}", core.index);
        }
        self.shared.retract(&mut core);
        if core.phase == Phase::Paused {
            core.phase = Phase::Idle;
        }
    }

    /// Freeze the current step, keeping its elapsed time.
    ///
    /// Returns `false` unless the timeline was running.
    pub fn pause(&self) -> bool {
        let now = self.shared.scheduler.now();
        let mut core = self.shared.core.borrow_mut();
        if core.phase != Phase::Running {
            return false;
        }
        core.held_elapsed = self.shared.elapsed_in_step(&core, now);
        self.shared.retract(&mut core);
        core.phase = Phase::Paused;
        true
    }

    /// Continue a paused timeline for the remainder of its current step.
    ///
    /// Returns `false` unless the timeline was paused.
    pub fn resume(&self) -> bool {
        let now = self.shared.scheduler.now();
        let mut core = self.shared.core.borrow_mut();
        if core.phase != Phase::Paused {
            return false;
        }
        let held = core.held_elapsed;
        let duration = self.shared.step_duration(core.index);
        core.step_started_at = now.saturating_sub(held);
        core.phase = Phase::Running;
        Shared::arm(&self.shared, &mut core, duration.saturating_sub(held));
        true
    }

    /// Report the active step's progress to the observer.
    ///
    /// Call once per animation frame. Returns the reported value, or `None`
    /// when the timeline is not running.
    pub fn tick(&self) -> Option<f32> {
        let now = self.shared.scheduler.now();
        let value = {
            let mut core = self.shared.core.borrow_mut();
            if core.phase != Phase::Running {
                return None;
            }
            let raw = self.shared.raw_progress(&core, now);
            let value = raw.max(core.last_progress);
            core.last_progress = value;
            value
        };
        self.shared.notify(Notice::Progress(value));
        Some(value)
    }

    /// Whether step `index` is completed or active.
    ///
    /// Earlier steps stay active once passed, until the timeline wraps back
    /// to step 0. Before the first start step 0 counts as active.
    pub fn is_active(&self, index: usize) -> bool {
        index < self.shared.sequence.len() && index <= self.current_index()
    }

    /// [`is_active`](Self::is_active) by step id.
    pub fn is_active_id(&self, id: &str) -> bool {
        self.shared
            .sequence
            .index_of(id)
            .is_some_and(|index| self.is_active(index))
    }

    /// Whether step `index` is exactly the current one.
    pub fn is_current(&self, index: usize) -> bool {
        index == self.current_index()
    }

    /// Index of the current step.
    pub fn current_index(&self) -> usize {
        self.shared.core.borrow().index
    }

    /// The current step.
    pub fn current_step(&self) -> &Step {
        let index = self.current_index();
        &self.shared.sequence.steps()[index]
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.shared.core.borrow().phase
    }

    /// Whether a transition is pending.
    pub fn is_running(&self) -> bool {
        self.phase() == Phase::Running
    }

    /// Progress of the current step in [0, 1] without notifying anyone.
    pub fn progress(&self) -> f32 {
        let now = self.shared.scheduler.now();
        let core = self.shared.core.borrow();
        self.shared.raw_progress(&core, now)
    }

    /// Snapshot at the scheduler's current time.
    pub fn state(&self) -> TimelineState {
        let now = self.shared.scheduler.now();
        let core = self.shared.core.borrow();
        TimelineState {
            current_step_index: core.index,
            elapsed_in_step: self.shared.elapsed_in_step(&core, now),
            running: core.phase == Phase::Running,
            cycle: core.cycle,
        }
    }

    /// The sequence being driven.
    pub fn sequence(&self) -> &Sequence {
        &self.shared.sequence
    }
}

impl Drop for SequenceTimeline {
    fn drop(&mut self) {
        if let Ok(mut core) = self.shared.core.try_borrow_mut() {
            self.shared.retract(&mut core);
        }
    }
}

impl fmt::Debug for SequenceTimeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let core = self.shared.core.borrow();
        f.debug_struct("SequenceTimeline")
            .field("steps", &self.shared.sequence.len())
            .field("looping", &self.shared.sequence.is_looping())
            .field("phase", &core.phase)
            .field("index", &core.index)
            .field("cycle", &core.cycle)
            .finish_non_exhaustive()
    }
}

impl Shared {
    fn step_duration(&self, index: usize) -> Duration {
        self.sequence
            .step(index)
            .map_or(Duration::ZERO, Step::duration)
    }

    fn elapsed_in_step(&self, core: &Core, now: Duration) -> Duration {
        match core.phase {
            Phase::Running => now
                .saturating_sub(core.step_started_at)
                .min(self.step_duration(core.index)),
            Phase::Idle | Phase::Paused | Phase::Completed => {
                core.held_elapsed
            }
        }
    }

    fn raw_progress(&self, core: &Core, now: Duration) -> f32 {
        let elapsed = self.elapsed_in_step(core, now);
        let duration = self.step_duration(core.index);
        (elapsed.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
            as f32
    }

    /// Cancel the pending timer and invalidate any callback already in flight.
    fn retract(&self, core: &mut Core) {
        if let Some(timer) = core.pending.take() {
            self.scheduler.cancel(timer);
        }
        core.generation = core.generation.wrapping_add(1);
    }

    /// Schedule the transition out of the current step.
    fn arm(this: &Rc<Self>, core: &mut Core, delay: Duration) {
        let generation = core.generation;
        let weak: Weak<Self> = Rc::downgrade(this);
        let timer = this.scheduler.schedule(
            delay,
            Box::new(move || {
                if let Some(shared) = weak.upgrade() {
                    shared.on_timer(generation);
                }
            }),
        );
        log::debug!("step {} transition armed in {delay:?}", core.index);
        core.pending = Some(timer);
    }

    fn activate(self: &Rc<Self>, index: usize, at: Duration) {
        let activation = {
            let mut core = self.core.borrow_mut();
            core.index = index;
            core.step_started_at = at;
            core.held_elapsed = Duration::ZERO;
            core.last_progress = 0.0;
            Self::arm(self, &mut core, self.step_duration(index));
            StepActivation {
                index,
                id: self.sequence.steps()[index].id().to_owned(),
                timestamp: at,
                cycle: core.cycle,
            }
        };
        log::debug!(
            "step {} '{}' active at {:?} (cycle {})",
            activation.index,
            activation.id,
            activation.timestamp,
            activation.cycle
        );
        self.notify(Notice::Step(activation));
    }

    fn on_timer(self: &Rc<Self>, generation: u64) {
        let now = self.scheduler.now();
        let next = {
            let mut core = self.core.borrow_mut();
            if core.generation != generation || core.phase != Phase::Running
            {
                log::warn!("stale timeline timer ignored");
                return;
            }
            core.pending = None;
            let next = core.index + 1;
            if next < self.sequence.len() {
                Some(next)
            } else if self.sequence.is_looping() {
                core.cycle += 1;
                Some(0)
            } else {
                core.phase = Phase::Completed;
                core.held_elapsed = self.step_duration(core.index);
                core.last_progress = 1.0;
                None
            }
        };

        match next {
            Some(index) => self.activate(index, now),
            None => {
                log::info!("timeline completed at {now:?}");
                self.notify(Notice::Complete(now));
            }
        }
    }

    fn replace_observer(&self, observer: Option<Box<dyn TimelineObserver>>) {
        self.observer_epoch
            .set(self.observer_epoch.get().wrapping_add(1));
        *self.observer.borrow_mut() = observer;
    }

    /// Deliver `notice`, or queue it behind the notification currently being
    /// delivered. Queued notices go out in order once the outer callback
    /// returns.
    fn notify(&self, notice: Notice) {
        self.outbox.borrow_mut().push_back(notice);
        if self.dispatching.replace(true) {
            return;
        }

        loop {
            let next = self.outbox.borrow_mut().pop_front();
            let Some(notice) = next else { break };

            // The observer is taken out of its slot for the call so that it
            // may re-enter the timeline, including replacing itself.
            let taken = self.observer.borrow_mut().take();
            let Some(mut observer) = taken else { continue };
            let epoch = self.observer_epoch.get();
            match &notice {
                Notice::Step(activation) => observer.on_step_change(activation),
                Notice::Progress(value) => observer.on_progress(*value),
                Notice::Complete(at) => observer.on_complete(*at),
            }
            if self.observer_epoch.get() == epoch {
                *self.observer.borrow_mut() = Some(observer);
            }
        }

        self.dispatching.set(false);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::clock::ManualScheduler;

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Step(usize, String, u64),
        Progress(f32),
        Complete(u64),
    }

    #[derive(Clone, Default)]
    struct Recorder {
        events: Rc<RefCell<Vec<Event>>>,
    }

    impl Recorder {
        fn steps(&self) -> Vec<String> {
            self.events
                .borrow()
                .iter()
                .filter_map(|e| match e {
                    Event::Step(_, id, _) => Some(id.clone()),
                    _ => None,
                })
                .collect()
        }

        fn snapshot(&self) -> Vec<Event> {
            self.events.borrow().clone()
        }
    }

    impl TimelineObserver for Recorder {
        fn on_step_change(&mut self, activation: &StepActivation) {
            self.events.borrow_mut().push(Event::Step(
                activation.index,
                activation.id.clone(),
                activation.timestamp.as_millis() as u64,
            ));
        }

        fn on_progress(&mut self, value: f32) {
            self.events.borrow_mut().push(Event::Progress(value));
        }

        fn on_complete(&mut self, timestamp: Duration) {
            self.events
                .borrow_mut()
                .push(Event::Complete(timestamp.as_millis() as u64));
        }
    }

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn ab(looping: bool) -> Sequence {
        let steps =
            vec![Step::from_millis("a", 1000), Step::from_millis("b", 1000)];
        Sequence::new(steps, looping).unwrap()
    }

    fn timeline(
        sequence: Sequence,
    ) -> (SequenceTimeline, ManualScheduler, Recorder) {
        let clock = ManualScheduler::new();
        let recorder = Recorder::default();
        let timeline = SequenceTimeline::new(sequence, clock.clone())
            .with_observer(recorder.clone());
        (timeline, clock, recorder)
    }

    #[test]
    fn wraps_after_last_step() {
        let (timeline, clock, recorder) = timeline(ab(true));
        timeline.start();
        clock.advance(ms(2500));

        assert_eq!(timeline.current_step().id(), "a");
        assert!(timeline.is_active_id("a"));
        assert!(!timeline.is_active_id("b"));
        assert_eq!(timeline.state().cycle, 1);
        assert_eq!(recorder.steps(), vec!["a", "b", "a"]);
        assert_eq!(
            recorder.snapshot()[2],
            Event::Step(0, "a".to_owned(), 2000)
        );
    }

    #[test]
    fn is_active_marks_completed_steps() {
        let seq = Sequence::looping(&[
            ("local", 1500),
            ("git", 1500),
            ("build", 1500),
            ("deploy", 3000),
        ])
        .unwrap();
        let (timeline, clock, _) = timeline(seq);
        timeline.start();

        for at in (0..15_000).step_by(250) {
            clock.advance_to(ms(at));
            let current = timeline.current_index();
            for i in 0..4 {
                assert_eq!(
                    timeline.is_active(i),
                    i <= current,
                    "t={at} i={i}"
                );
            }
            assert!(!timeline.is_active(4));
        }
    }

    #[test]
    fn play_once_completes_exactly_once() {
        let (timeline, clock, recorder) = timeline(ab(false));
        timeline.start();
        clock.advance(ms(5000));

        assert_eq!(timeline.phase(), Phase::Completed);
        assert_eq!(clock.pending(), 0);
        let completions = recorder
            .snapshot()
            .into_iter()
            .filter(|e| matches!(e, Event::Complete(_)))
            .count();
        assert_eq!(completions, 1);
        assert_eq!(recorder.snapshot().last(), Some(&Event::Complete(2000)));

        let state = timeline.state();
        assert_eq!(state.current_step_index, 1);
        assert_eq!(state.elapsed_in_step, ms(1000));
        assert!(!state.running);
    }

    #[test]
    fn cancel_stops_all_transitions() {
        let (timeline, clock, recorder) = timeline(ab(true));
        timeline.start();
        clock.advance(ms(1500));
        timeline.cancel();
        let before = recorder.snapshot();

        clock.advance(ms(10_000));
        assert_eq!(recorder.snapshot(), before);
        assert_eq!(clock.pending(), 0);
        assert_eq!(timeline.phase(), Phase::Idle);
        assert_eq!(timeline.state().elapsed_in_step, ms(500));
    }

    #[test]
    fn cancel_is_idempotent() {
        let (timeline, clock, _) = timeline(ab(true));
        timeline.cancel();
        timeline.start();
        clock.advance(ms(1200));
        timeline.cancel();
        let once = timeline.state();
        timeline.cancel();
        assert_eq!(timeline.state(), once);
        assert_eq!(timeline.phase(), Phase::Idle);
    }

    #[test]
    fn observer_cancel_inside_callback_suppresses_due_timer() {
        let clock = ManualScheduler::new();
        let fired = Rc::new(RefCell::new(Vec::new()));
        let timeline = Rc::new(SequenceTimeline::new(
            Sequence::looping(&[("a", 100), ("b", 100)]).unwrap(),
            clock.clone(),
        ));

        let weak = Rc::downgrade(&timeline);
        let fired_cb = Rc::clone(&fired);
        timeline.set_observer(move |activation: &StepActivation| {
            fired_cb.borrow_mut().push(activation.id.clone());
            if activation.id == "b" {
                if let Some(timeline) = weak.upgrade() {
                    timeline.cancel();
                }
            }
        });

        timeline.start();
        clock.advance(ms(1000));
        assert_eq!(*fired.borrow(), vec!["a", "b"]);
        assert_eq!(timeline.phase(), Phase::Idle);
    }

    #[test]
    fn restart_from_observer_is_delivered_in_order() {
        let clock = ManualScheduler::new();
        let fired = Rc::new(RefCell::new(Vec::new()));
        let timeline = Rc::new(SequenceTimeline::new(
            Sequence::once(&[("a", 100), ("b", 100)]).unwrap(),
            clock.clone(),
        ));

        let weak = Rc::downgrade(&timeline);
        let fired_cb = Rc::clone(&fired);
        let restarted = Rc::new(Cell::new(false));
        timeline.set_observer(move |activation: &StepActivation| {
            fired_cb.borrow_mut().push(activation.id.clone());
            if activation.id == "b" && !restarted.replace(true) {
                if let Some(timeline) = weak.upgrade() {
                    timeline.start();
                }
            }
        });

        timeline.start();
        clock.advance(ms(150));
        assert_eq!(*fired.borrow(), vec!["a", "b", "a"]);
        assert_eq!(timeline.current_index(), 0);

        clock.advance(ms(1000));
        assert_eq!(*fired.borrow(), vec!["a", "b", "a", "b"]);
        assert_eq!(timeline.phase(), Phase::Completed);
    }

    #[test]
    fn dropping_timeline_retracts_timer() {
        let (timeline, clock, recorder) = timeline(ab(true));
        timeline.start();
        assert_eq!(clock.pending(), 1);
        drop(timeline);
        assert_eq!(clock.pending(), 0);

        clock.advance(ms(5000));
        assert_eq!(recorder.steps(), vec!["a"]);
    }

    #[test]
    fn single_timer_pending_while_running() {
        let (timeline, clock, _) = timeline(ab(true));
        timeline.start();
        for _ in 0..20 {
            assert_eq!(clock.pending(), 1);
            clock.advance(ms(333));
        }
        timeline.start();
        assert_eq!(clock.pending(), 1);
    }

    #[test]
    fn restart_resets_to_first_step() {
        let (timeline, clock, recorder) = timeline(ab(true));
        timeline.start();
        clock.advance(ms(1500));
        timeline.start();
        assert_eq!(timeline.current_index(), 0);
        assert_eq!(timeline.state().cycle, 0);
        clock.advance(ms(999));
        assert_eq!(timeline.current_index(), 0);
        clock.advance(ms(1));
        assert_eq!(timeline.current_index(), 1);
        assert_eq!(recorder.steps(), vec!["a", "b", "a", "b"]);
    }

    #[test]
    fn progress_is_monotonic_within_step_and_resets() {
        let (timeline, clock, recorder) = timeline(ab(true));
        assert_eq!(timeline.tick(), None);
        timeline.start();

        let mut last = 0.0_f32;
        for _ in 0..9 {
            clock.advance(ms(100));
            let value = timeline.tick().unwrap();
            assert!(value >= last);
            last = value;
        }
        assert!((last - 0.9).abs() < 1e-6);

        clock.advance(ms(150));
        let after_boundary = timeline.tick().unwrap();
        assert!((after_boundary - 0.05).abs() < 1e-6);

        let progress: Vec<f32> = recorder
            .snapshot()
            .into_iter()
            .filter_map(|e| match e {
                Event::Progress(v) => Some(v),
                _ => None,
            })
            .collect();
        assert_eq!(progress.len(), 10);
    }

    #[test]
    fn pause_and_resume_keep_remaining_time() {
        let (timeline, clock, recorder) = timeline(ab(true));
        timeline.start();
        clock.advance(ms(400));
        assert!(timeline.pause());
        assert!(!timeline.pause());
        assert_eq!(clock.pending(), 0);

        clock.advance(ms(5000));
        assert_eq!(timeline.current_index(), 0);
        assert_eq!(timeline.state().elapsed_in_step, ms(400));

        assert!(timeline.resume());
        assert!(!timeline.resume());
        clock.advance(ms(599));
        assert_eq!(timeline.current_index(), 0);
        clock.advance(ms(1));
        assert_eq!(timeline.current_index(), 1);
        assert_eq!(recorder.steps(), vec!["a", "b"]);
    }

    #[test]
    fn closure_observer_receives_activations() {
        let clock = ManualScheduler::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_cb = Rc::clone(&seen);
        let timeline = SequenceTimeline::new(ab(true), clock.clone())
            .with_observer(move |a: &StepActivation| {
                seen_cb.borrow_mut().push((a.index, a.cycle));
            });
        timeline.start();
        clock.advance(ms(4000));
        assert_eq!(
            *seen.borrow(),
            vec![(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)]
        );
    }

    #[test]
    fn instances_are_independent() {
        let clock = ManualScheduler::new();
        let first = SequenceTimeline::new(ab(true), clock.clone());
        let second = SequenceTimeline::new(
            Sequence::looping(&[("x", 300), ("y", 300), ("z", 300)]).unwrap(),
            clock.clone(),
        );
        first.start();
        second.start();
        clock.advance(ms(1300));
        first.cancel();
        clock.advance(ms(300));
        assert_eq!(first.current_index(), 1);
        assert_eq!(second.current_step().id(), "z");
        assert!(second.is_running());
    }
}
