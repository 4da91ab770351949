use std::time::{Duration, Instant};

use crate::config::EASE_DURATION_MS;
use crate::ui::Easing;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Phase {
    Idle { value: f64 },
    Easing { from: f64, to: f64, started: Instant },
}

/// A number that eases toward its target instead of jumping.
///
/// Time is passed in explicitly so the owner decides the frame clock.
#[derive(Clone, Debug)]
pub struct AnimatedValue {
    phase: Phase,
    duration: Duration,
    easing: Easing,
}

impl AnimatedValue {
    pub fn new(value: f64) -> Self {
        Self {
            phase: Phase::Idle { value },
            duration: Duration::from_millis(EASE_DURATION_MS),
            easing: Easing::default(),
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn target(&self) -> f64 {
        match self.phase {
            Phase::Idle { value } => value,
            Phase::Easing { to, .. } => to,
        }
    }

    pub fn is_easing(&self) -> bool {
        matches!(self.phase, Phase::Easing { .. })
    }

    /// Value shown at `now`.
    pub fn sample(&self, now: Instant) -> f64 {
        match self.phase {
            Phase::Idle { value } => value,
            Phase::Easing { from, to, started } => {
                let elapsed = now.saturating_duration_since(started);
                if elapsed >= self.duration {
                    return to;
                }
                let progress = elapsed.as_secs_f64() / self.duration.as_secs_f64();
                from + (to - from) * self.easing.apply(progress)
            }
        }
    }

    /// Starts easing toward `to` from wherever the value is at `now`.
    /// Returns false when `to` already is the target.
    pub fn retarget(&mut self, to: f64, now: Instant) -> bool {
        if self.target() == to {
            return false;
        }
        let from = self.sample(now);
        self.phase = if self.duration.is_zero() {
            Phase::Idle { value: to }
        } else {
            Phase::Easing {
                from,
                to,
                started: now,
            }
        };
        true
    }

    /// Settles into `Idle` once the ease has run its course.
    pub fn tick(&mut self, now: Instant) {
        if let Phase::Easing { to, started, .. } = self.phase {
            if now.saturating_duration_since(started) >= self.duration {
                self.phase = Phase::Idle { value: to };
            }
        }
    }
}
