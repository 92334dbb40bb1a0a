//! Per-bulb timers for classic mode

use embassy_time::{Duration, Instant};

use crate::config::AnimationTimings;
use crate::random::RandomSource;

/// Blink speed class of a bulb, fixed by its index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedClass {
    Slow,
    Medium,
    Fast,
}

impl SpeedClass {
    /// Spread the classes over the string with `(index * 13) mod 10`, so
    /// neighbours rarely share one.
    pub fn for_index(index: usize) -> Self {
        match index.wrapping_mul(13) % 10 {
            0..=2 => Self::Slow,
            3..=6 => Self::Medium,
            _ => Self::Fast,
        }
    }

    pub fn glow_interval<R: RandomSource>(self, timings: &AnimationTimings, rng: &mut R) -> Duration {
        match self {
            Self::Slow => timings.glow_slow.sample(rng),
            Self::Medium => timings.glow_medium.sample(rng),
            Self::Fast => timings.glow_fast.sample(rng),
        }
    }
}

/// Glow and color timers of one bulb
#[derive(Debug, Clone, Copy)]
pub(crate) struct BulbTimers {
    class: SpeedClass,
    last_glow: Instant,
    glow_interval: Duration,
    last_color: Instant,
    color_interval: Duration,
}

impl BulbTimers {
    pub(crate) fn new<R: RandomSource>(
        index: usize,
        now: Instant,
        timings: &AnimationTimings,
        rng: &mut R,
    ) -> Self {
        let class = SpeedClass::for_index(index);
        Self {
            class,
            last_glow: now,
            glow_interval: class.glow_interval(timings, rng),
            last_color: now,
            color_interval: timings.color_interval.sample(rng),
        }
    }

    pub(crate) fn glow_due(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.last_glow) >= self.glow_interval
    }

    pub(crate) fn color_due(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.last_color) >= self.color_interval
    }

    /// Restart the glow timer with a freshly drawn interval
    pub(crate) fn reset_glow<R: RandomSource>(&mut self, now: Instant, timings: &AnimationTimings, rng: &mut R) {
        self.last_glow = now;
        self.glow_interval = self.class.glow_interval(timings, rng);
    }

    /// Restart the color timer with a freshly drawn interval
    pub(crate) fn reset_color<R: RandomSource>(&mut self, now: Instant, timings: &AnimationTimings, rng: &mut R) {
        self.last_color = now;
        self.color_interval = timings.color_interval.sample(rng);
    }

    pub(crate) fn glow_interval(&self) -> Duration {
        self.glow_interval
    }

    pub(crate) fn color_interval(&self) -> Duration {
        self.color_interval
    }
}
