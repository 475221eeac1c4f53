//! Projection and lookup hot paths, sampled once per animation frame.
#![allow(missing_docs)]

use std::hint::black_box;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, Criterion};
use storyline::animation::{
    presets, Interval, Scrubber, Sequence, SequenceTimeline, TransitionKind,
};
use storyline::clock::ManualScheduler;
use storyline::util::easing::EasingFunction;

fn easing_benchmark(c: &mut Criterion) {
    let f = EasingFunction::EASE_IN_OUT;
    c.bench_function("ease_in_out_bezier", |b| {
        b.iter(|| black_box(f.evaluate(black_box(0.37))))
    });

    let spring = TransitionKind::CAROUSEL_SPRING;
    let window = Duration::from_millis(700);
    c.bench_function("carousel_spring", |b| {
        b.iter(|| black_box(spring.evaluate(black_box(0.37), window)))
    });
}

fn locate_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("sequence_locate");

    for count in [4, 32, 256] {
        let steps: Vec<(String, u64)> =
            (0..count).map(|i| (format!("step-{i}"), 100 + i)).collect();
        let refs: Vec<(&str, u64)> =
            steps.iter().map(|(id, ms)| (id.as_str(), *ms)).collect();
        let Ok(sequence) = Sequence::looping(&refs) else {
            continue;
        };
        let at = Duration::from_millis(123_456);

        group.bench_function(format!("{count}_steps"), |b| {
            b.iter(|| black_box(sequence.locate(black_box(at))))
        });
    }
    group.finish();
}

fn projection_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("scrubber_project");

    for count in [3, 30, 300] {
        let mut scrubber = Scrubber::cyclic(Duration::from_secs(10));
        for i in 0..count {
            let start = f64::from(i) * 0.03;
            let interval = Interval::from_secs(start, 1.5)
                .with_transition(TransitionKind::EaseInOut);
            if scrubber.insert(format!("bar-{i}"), interval).is_err() {
                continue;
            }
        }
        let at = Duration::from_millis(4321);

        group.bench_function(format!("{count}_intervals"), |b| {
            b.iter(|| black_box(scrubber.project(black_box(at))))
        });
    }
    group.finish();

    let track = presets::debugger_scrubber();
    c.bench_function("debugger_track_sample", |b| {
        b.iter(|| {
            black_box(track.sample(black_box(Duration::from_millis(7250))))
        });
    });
}

fn timeline_tick_benchmark(c: &mut Criterion) {
    let Ok(sequence) = presets::deployment_pipeline() else {
        return;
    };
    let clock = ManualScheduler::new();
    let timeline = SequenceTimeline::new(sequence, clock.clone());
    timeline.start();

    c.bench_function("timeline_frame", |b| {
        b.iter(|| {
            clock.advance(Duration::from_millis(16));
            black_box(timeline.tick())
        })
    });
}

criterion_group!(
    benches,
    easing_benchmark,
    locate_benchmark,
    projection_benchmark,
    timeline_tick_benchmark
);
criterion_main!(benches);
