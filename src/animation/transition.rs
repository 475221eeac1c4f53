//! Transition describes how a value travels between two endpoints.

use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;
use crate::util::easing::EasingFunction;

/// Envelope amplitude below which a spring counts as settled.
const SPRING_SETTLE_THRESHOLD: f64 = 1e-3;

/// Interpolation curve for a transition.
///
/// Every kind maps progress 0 to exactly 0 and progress 1 to exactly 1.
/// Linear and EaseInOut are monotonic; an underdamped spring overshoots
/// inside the window.
#[derive(
    Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema, Default,
)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransitionKind {
    /// Constant speed.
    #[default]
    Linear,
    /// Browser `ease-in-out` timing curve.
    EaseInOut,
    /// Damped harmonic oscillator, time-scaled to the transition duration.
    Spring {
        /// Spring constant.
        stiffness: f32,
        /// Damping coefficient.
        damping: f32,
        /// Attached mass.
        mass: f32,
    },
}

impl TransitionKind {
    /// Spring used by the feature carousel track.
    pub const CAROUSEL_SPRING: TransitionKind = TransitionKind::Spring {
        stiffness: 150.0,
        damping: 20.0,
        mass: 1.0,
    };

    /// Reject spring parameters that cannot be integrated.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        match *self {
            TransitionKind::Linear | TransitionKind::EaseInOut => Ok(()),
            TransitionKind::Spring {
                stiffness,
                damping,
                mass,
            } => {
                let ok = [stiffness, damping, mass]
                    .iter()
                    .all(|v| v.is_finite() && *v > 0.0);
                if ok {
                    Ok(())
                } else {
                    Err(ConfigurationError::InvalidSpring)
                }
            }
        }
    }

    /// Eased value for raw progress `t` over a window of length `duration`.
    ///
    /// Input t is clamped to [0.0, 1.0]. `duration` only matters for
    /// springs, whose shape depends on physical time.
    pub fn evaluate(&self, t: f32, duration: Duration) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            TransitionKind::Linear => t,
            TransitionKind::EaseInOut => {
                EasingFunction::EASE_IN_OUT.evaluate(t)
            }
            TransitionKind::Spring {
                stiffness,
                damping,
                mass,
            } => {
                if t == 0.0 || t == 1.0 {
                    return t;
                }
                let spring = SpringCurve::new(stiffness, damping, mass);
                let window = duration.as_secs_f64();
                let end = spring.displacement(window);
                if window <= 0.0 || end.abs() < 1e-6 {
                    return t;
                }
                // Normalize so the window ends exactly on the target.
                (spring.displacement(f64::from(t) * window) / end) as f32
            }
        }
    }

    /// Time the curve needs to look finished, if it defines one.
    ///
    /// Springs report the time until oscillation drops below 0.1% of the
    /// travel distance, or `None` if that time does not fit in a
    /// `Duration`. Other kinds have no intrinsic length.
    pub fn natural_duration(&self) -> Option<Duration> {
        match *self {
            TransitionKind::Linear | TransitionKind::EaseInOut => None,
            TransitionKind::Spring {
                stiffness,
                damping,
                mass,
            } => {
                self.validate().ok()?;
                let secs =
                    SpringCurve::new(stiffness, damping, mass).settle_time();
                Duration::try_from_secs_f64(secs).ok()
            }
        }
    }
}

/// A transition kind bound to a duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    /// Interpolation curve.
    pub kind: TransitionKind,
    /// How long the transition runs.
    pub duration: Duration,
}

impl Transition {
    /// Constant-speed transition.
    #[must_use]
    pub fn linear(duration: Duration) -> Self {
        Self {
            kind: TransitionKind::Linear,
            duration,
        }
    }

    /// Ease-in-out transition.
    #[must_use]
    pub fn ease_in_out(duration: Duration) -> Self {
        Self {
            kind: TransitionKind::EaseInOut,
            duration,
        }
    }

    /// Spring transition lasting until the spring settles.
    pub fn spring(
        stiffness: f32,
        damping: f32,
        mass: f32,
    ) -> Result<Self, ConfigurationError> {
        let kind = TransitionKind::Spring {
            stiffness,
            damping,
            mass,
        };
        let duration =
            kind.natural_duration().ok_or(ConfigurationError::InvalidSpring)?;
        Ok(Self { kind, duration })
    }

    /// Eased progress at `elapsed` since the transition began.
    pub fn progress_at(&self, elapsed: Duration) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let raw = (elapsed.as_secs_f64() / self.duration.as_secs_f64())
            .min(1.0) as f32;
        self.kind.evaluate(raw, self.duration)
    }

    /// Whether the transition has run its full duration.
    pub fn is_complete(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }
}

impl Default for Transition {
    fn default() -> Self {
        Self::ease_in_out(Duration::from_millis(300))
    }
}

/// Closed-form response of a damped spring released from 0 toward 1 at rest.
#[derive(Debug, Clone, Copy)]
struct SpringCurve {
    omega: f64,
    zeta: f64,
}

impl SpringCurve {
    fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        let (k, c, m) =
            (f64::from(stiffness), f64::from(damping), f64::from(mass));
        let omega = (k / m).sqrt();
        let zeta = c / (2.0 * (k * m).sqrt());
        Self { omega, zeta }
    }

    /// Position at time `t` seconds.
    fn displacement(&self, t: f64) -> f64 {
        let Self { omega, zeta } = *self;
        if zeta < 1.0 {
            let omega_d = omega * (1.0 - zeta * zeta).sqrt();
            let envelope = (-zeta * omega * t).exp();
            1.0 - envelope
                * ((omega_d * t).cos()
                    + (zeta * omega / omega_d) * (omega_d * t).sin())
        } else if (zeta - 1.0).abs() < 1e-9 {
            1.0 - (-omega * t).exp() * (1.0 + omega * t)
        } else {
            let root = (zeta * zeta - 1.0).sqrt();
            let r1 = -omega * (zeta - root);
            let r2 = -omega * (zeta + root);
            1.0 - (r2 * (r1 * t).exp() - r1 * (r2 * t).exp()) / (r2 - r1)
        }
    }

    /// Seconds until the decay envelope drops below the settle threshold.
    fn settle_time(&self) -> f64 {
        // Slowest decay rate: zeta*omega when underdamped, the smaller root
        // magnitude otherwise.
        let rate = if self.zeta <= 1.0 {
            self.zeta * self.omega
        } else {
            self.omega * (self.zeta - (self.zeta * self.zeta - 1.0).sqrt())
        };
        -SPRING_SETTLE_THRESHOLD.ln() / rate
    }
}
