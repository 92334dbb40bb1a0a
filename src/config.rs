//! Lights configuration
//!
//! Everything the scheduler needs is passed in here at construction. The JSON
//! form is a flat object with millisecond fields; every key is optional and
//! falls back to [`LightsConfig::default`].

use core::fmt;

use embassy_time::Duration;
use serde::Deserialize;

use crate::color::ColorChoice;
use crate::mode::{BREATHE_THRESHOLD, GlowWave, LightMode, PULSE_THRESHOLD};
use crate::random::RandomSource;

/// Half-open range `[min, max)` that random intervals are drawn from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IntervalRange {
    pub min: Duration,
    pub max: Duration,
}

impl IntervalRange {
    pub const fn from_millis(min: u64, max: u64) -> Self {
        Self {
            min: Duration::from_millis(min),
            max: Duration::from_millis(max),
        }
    }

    /// Draw a uniform duration from the range
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn sample<R: RandomSource>(&self, rng: &mut R) -> Duration {
        let span = self.max.as_micros().saturating_sub(self.min.as_micros());
        let offset = (span as f64 * f64::from(rng.next_unit())) as u64;
        Duration::from_micros(self.min.as_micros() + offset.min(span))
    }

    fn is_valid(&self) -> bool {
        self.min <= self.max
    }
}

/// Timing constants of the animation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimationTimings {
    /// Period of the update step
    pub tick: Duration,
    /// Pause after setup before bulbs leave the initial color
    pub settle_delay: Duration,
    /// Extra delay per bulb index when revealing colors
    pub stagger: Duration,
    /// Classic mode color change interval
    pub color_interval: IntervalRange,
    /// Glow interval of slow blinking bulbs
    pub glow_slow: IntervalRange,
    /// Glow interval of medium blinking bulbs
    pub glow_medium: IntervalRange,
    /// Glow interval of fast blinking bulbs
    pub glow_fast: IntervalRange,
    /// Full cycle of the pulse wave
    pub pulse_period: Duration,
    /// Full cycle of the breathe wave
    pub breathe_period: Duration,
}

impl Default for AnimationTimings {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(250),
            settle_delay: Duration::from_millis(3000),
            stagger: Duration::from_millis(100),
            color_interval: IntervalRange::from_millis(8_000, 15_000),
            glow_slow: IntervalRange::from_millis(3_000, 6_000),
            glow_medium: IntervalRange::from_millis(1_000, 3_000),
            glow_fast: IntervalRange::from_millis(1_000, 2_000),
            pulse_period: Duration::from_millis(1500),
            breathe_period: Duration::from_millis(6000),
        }
    }
}

impl AnimationTimings {
    /// Wave used by the given mode, `None` for classic
    pub fn wave(&self, mode: LightMode) -> Option<GlowWave> {
        match mode {
            LightMode::Classic => None,
            LightMode::Pulse => Some(GlowWave {
                period: self.pulse_period,
                threshold: PULSE_THRESHOLD,
            }),
            LightMode::Breathe => Some(GlowWave {
                period: self.breathe_period,
                threshold: BREATHE_THRESHOLD,
            }),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let zero = Duration::from_ticks(0);
        if self.tick == zero || self.pulse_period == zero || self.breathe_period == zero {
            return Err(ConfigError::ZeroDuration);
        }
        let ranges = [
            self.color_interval,
            self.glow_slow,
            self.glow_medium,
            self.glow_fast,
        ];
        if ranges.iter().any(|range| !range.is_valid()) {
            return Err(ConfigError::InvertedInterval);
        }
        Ok(())
    }
}

/// Complete configuration of a lights session
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct LightsConfig {
    pub mode: LightMode,
    pub color: ColorChoice,
    pub timings: AnimationTimings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Payload is not a valid config object
    Deserialization,
    /// Unknown light mode name
    UnknownMode,
    /// Unknown color choice name
    UnknownColor,
    /// Tick or wave period is zero
    ZeroDuration,
    /// Interval range with `min > max`
    InvertedInterval,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Deserialization => write!(f, "Invalid config JSON"),
            ConfigError::UnknownMode => write!(f, "Unknown light mode"),
            ConfigError::UnknownColor => write!(f, "Unknown color choice"),
            ConfigError::ZeroDuration => write!(f, "Tick and wave periods must be non-zero"),
            ConfigError::InvertedInterval => write!(f, "Interval minimum exceeds maximum"),
        }
    }
}

#[derive(Deserialize)]
struct RawLightsConfig<'a> {
    #[serde(default, borrow)]
    mode: Option<&'a str>,
    #[serde(default, borrow)]
    color: Option<&'a str>,
    #[serde(default)]
    tick_ms: Option<u32>,
    #[serde(default)]
    settle_ms: Option<u32>,
    #[serde(default)]
    stagger_ms: Option<u32>,
    #[serde(default)]
    color_interval_min_ms: Option<u32>,
    #[serde(default)]
    color_interval_max_ms: Option<u32>,
    #[serde(default)]
    pulse_period_ms: Option<u32>,
    #[serde(default)]
    breathe_period_ms: Option<u32>,
}

fn millis_or(value: Option<u32>, fallback: Duration) -> Duration {
    value.map_or(fallback, |ms| Duration::from_millis(u64::from(ms)))
}

impl LightsConfig {
    /// Parse a config object, filling missing keys from the defaults.
    pub fn from_json(payload: &[u8]) -> Result<Self, ConfigError> {
        let (raw, _) = serde_json_core::from_slice::<RawLightsConfig<'_>>(payload).map_err(|_e| {
            #[cfg(feature = "log")]
            log::warn!("lights: rejected config payload: {:?}", _e);

            ConfigError::Deserialization
        })?;

        let mode = match raw.mode {
            Some(name) => LightMode::parse_from_str(name).ok_or(ConfigError::UnknownMode)?,
            None => LightMode::default(),
        };
        let color = match raw.color {
            Some(name) => ColorChoice::parse_from_str(name).ok_or(ConfigError::UnknownColor)?,
            None => ColorChoice::default(),
        };

        let defaults = AnimationTimings::default();
        let timings = AnimationTimings {
            tick: millis_or(raw.tick_ms, defaults.tick),
            settle_delay: millis_or(raw.settle_ms, defaults.settle_delay),
            stagger: millis_or(raw.stagger_ms, defaults.stagger),
            color_interval: IntervalRange {
                min: millis_or(raw.color_interval_min_ms, defaults.color_interval.min),
                max: millis_or(raw.color_interval_max_ms, defaults.color_interval.max),
            },
            pulse_period: millis_or(raw.pulse_period_ms, defaults.pulse_period),
            breathe_period: millis_or(raw.breathe_period_ms, defaults.breathe_period),
            ..defaults
        };
        timings.validate()?;

        Ok(Self {
            mode,
            color,
            timings,
        })
    }
}
