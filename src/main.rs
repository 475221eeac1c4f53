//! Headless preview of a storyline sequence.
//!
//! Plays a built-in or configured sequence on a virtual clock and logs each
//! step change, so a page's choreography can be checked without a browser.
//!
//! ```text
//! storyline [SEQUENCE] [--ms N] [--frame N] [--config FILE]
//! ```
//!
//! Run with `RUST_LOG=info` (or `debug` for per-frame progress).

use std::path::PathBuf;
use std::time::Duration;

use storyline::animation::{
    format_timecode, presets, remap, SequenceTimeline, StepActivation,
    TimelineObserver, Track,
};
use storyline::clock::ManualScheduler;
use storyline::options::Options;
use storyline::StorylineError;

struct Args {
    sequence: String,
    run_for: Duration,
    frame: Option<Duration>,
    config: Option<PathBuf>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        sequence: presets::SEQUENCE_PRESETS[0].to_owned(),
        run_for: Duration::from_secs(15),
        frame: None,
        config: None,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--ms" => {
                args.run_for = Duration::from_millis(millis(iter.next())?);
            }
            "--frame" => {
                let frame = millis(iter.next())?.max(1);
                args.frame = Some(Duration::from_millis(frame));
            }
            "--config" => {
                let path = iter.next().ok_or("--config needs a path")?;
                args.config = Some(PathBuf::from(path));
            }
            flag if flag.starts_with("--") => {
                return Err(format!("unknown flag {flag}"));
            }
            name => name.clone_into(&mut args.sequence),
        }
    }
    Ok(args)
}

fn millis(value: Option<String>) -> Result<u64, String> {
    let value = value.ok_or("expected a number of milliseconds")?;
    value
        .parse()
        .map_err(|_| format!("'{value}' is not a number of milliseconds"))
}

/// Logs notifications; samples the debugger scrubber when replaying it.
struct Narrator {
    scrubber: Option<Track>,
    frames: u64,
}

impl TimelineObserver for Narrator {
    fn on_step_change(&mut self, activation: &StepActivation) {
        let at = format_timecode(activation.timestamp);
        match &self.scrubber {
            Some(track) => {
                let percent = track.sample(activation.timestamp);
                let recording = remap(
                    percent,
                    (0.0, 100.0),
                    (0.0, presets::DEBUGGER_RECORDING.as_secs_f32()),
                );
                log::info!(
                    "[{at}] step {} '{}' (cycle {}), scrubber {percent:.0}% \
                     = {}",
                    activation.index,
                    activation.id,
                    activation.cycle,
                    format_timecode(Duration::from_secs_f32(recording)),
                );
            }
            None => log::info!(
                "[{at}] step {} '{}' (cycle {})",
                activation.index,
                activation.id,
                activation.cycle
            ),
        }
    }

    fn on_progress(&mut self, value: f32) {
        self.frames += 1;
        log::debug!("frame {}: {:.3}", self.frames, value);
    }

    fn on_complete(&mut self, timestamp: Duration) {
        log::info!("[{}] sequence complete", format_timecode(timestamp));
    }
}

fn run(args: &Args) -> Result<(), StorylineError> {
    let options = match &args.config {
        Some(path) => Options::load(path)?,
        None => Options::default(),
    };
    let sequence = options.sequence(&args.sequence)?;
    log::info!(
        "playing '{}': {} steps, {} per cycle{}",
        args.sequence,
        sequence.len(),
        format_timecode(sequence.cycle_duration()),
        if sequence.is_looping() { ", looping" } else { "" }
    );

    let clock = ManualScheduler::new();
    let narrator = Narrator {
        scrubber: (args.sequence == "debugger_replay")
            .then(presets::debugger_scrubber),
        frames: 0,
    };
    let timeline =
        SequenceTimeline::new(sequence, clock.clone()).with_observer(narrator);
    timeline.start();

    let frame = args.frame.unwrap_or_else(|| options.timeline.frame_interval());
    let mut elapsed = Duration::ZERO;
    while elapsed < args.run_for && timeline.is_running() {
        let step = frame.min(args.run_for - elapsed);
        clock.advance(step);
        elapsed += step;
        let _ = timeline.tick();
    }

    let state = timeline.state();
    log::info!(
        "stopped at {} in step {} ({} into it)",
        format_timecode(elapsed),
        state.current_step_index,
        format_timecode(state.elapsed_in_step)
    );
    timeline.cancel();
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            log::error!("{e}");
            log::error!(
                "Usage: storyline [SEQUENCE] [--ms N] [--frame N] \
                 [--config FILE]"
            );
            std::process::exit(2);
        }
    };

    if let Err(e) = run(&args) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
