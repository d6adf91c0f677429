use std::time::Duration;

use crate::animation::ease::Ease;

/// Time-boxed interpolation of a scalar, sampled against the host clock.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollTween {
    /// Start value.
    pub from: f64,
    /// End value.
    pub to: f64,
    /// Host time at which playback began.
    pub start: Duration,
    /// Playback length; never zero.
    pub duration: Duration,
    /// Easing curve.
    pub ease: Ease,
}

impl ScrollTween {
    /// Build a tween; a zero duration is bumped to one millisecond.
    pub fn new(from: f64, to: f64, start: Duration, duration: Duration, ease: Ease) -> Self {
        Self {
            from,
            to,
            start,
            duration: duration.max(Duration::from_millis(1)),
            ease,
        }
    }

    /// Linear time fraction in `[0, 1]` at `now`.
    pub fn time_fraction(&self, now: Duration) -> f64 {
        let elapsed = now.saturating_sub(self.start);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Eased value at `now`.
    pub fn sample(&self, now: Duration) -> f64 {
        let t = self.time_fraction(now);
        if t >= 1.0 {
            return self.to;
        }
        self.ease.lerp(self.from, self.to, t)
    }

    /// Whether playback has reached the end value.
    pub fn is_done(&self, now: Duration) -> bool {
        now.saturating_sub(self.start) >= self.duration
    }

    /// Restart from the current sample towards a new target.
    pub fn retarget(&mut self, now: Duration, to: f64, duration: Duration) {
        let current = self.sample(now);
        *self = Self::new(current, to, now, duration, self.ease);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
