//! Light modes
//!
//! A mode selects the glow rule applied uniformly to every bulb on each tick.
//! `Classic` is timer driven and handled by the scheduler itself; `Pulse` and
//! `Breathe` are pure functions of time and the bulb's phase offset.

use core::f64::consts::TAU;

use embassy_time::{Duration, Instant};

const MODE_NAME_CLASSIC: &str = "classic";
const MODE_NAME_PULSE: &str = "pulse";
const MODE_NAME_BREATHE: &str = "breathe";

const MODE_ID_CLASSIC: u8 = 0;
const MODE_ID_PULSE: u8 = 1;
const MODE_ID_BREATHE: u8 = 2;

/// Breathe keeps a bulb lit while the wave is above this level,
/// so bulbs stay on for most of the cycle.
pub const BREATHE_THRESHOLD: f64 = -0.2;

/// Pulse lights a bulb on the positive half of the wave.
pub const PULSE_THRESHOLD: f64 = 0.0;

/// Glow rule applied to all bulbs
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum LightMode {
    /// Independent random blink and color timers per bulb
    #[default]
    Classic = MODE_ID_CLASSIC,
    /// Fast sine wave, lit on the positive half
    Pulse = MODE_ID_PULSE,
    /// Slow sine wave, lit most of the cycle
    Breathe = MODE_ID_BREATHE,
}

impl LightMode {
    pub const ALL: [LightMode; 3] = [Self::Classic, Self::Pulse, Self::Breathe];

    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            MODE_ID_CLASSIC => Self::Classic,
            MODE_ID_PULSE => Self::Pulse,
            MODE_ID_BREATHE => Self::Breathe,
            _ => return None,
        })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Classic => MODE_NAME_CLASSIC,
            Self::Pulse => MODE_NAME_PULSE,
            Self::Breathe => MODE_NAME_BREATHE,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            MODE_NAME_CLASSIC => Some(Self::Classic),
            MODE_NAME_PULSE => Some(Self::Pulse),
            MODE_NAME_BREATHE => Some(Self::Breathe),
            _ => None,
        }
    }
}

/// Sine wave that decides whether a bulb glows
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlowWave {
    /// Duration of one full cycle
    pub period: Duration,
    /// Bulb glows while the wave is strictly above this value
    pub threshold: f64,
}

impl GlowWave {
    /// Wave value in `[-1, 1]` at `now` for a bulb with `phase_offset`.
    #[allow(clippy::cast_precision_loss)]
    pub fn phase(&self, now: Instant, phase_offset: f32) -> f64 {
        let period = self.period.as_micros().max(1) as f64 / 1_000_000.0;
        let t = seconds(now);
        libm::sin((TAU / period) * t + f64::from(phase_offset))
    }

    pub fn is_glowing(&self, now: Instant, phase_offset: f32) -> bool {
        self.phase(now, phase_offset) > self.threshold
    }
}

/// Clock reading in seconds
#[allow(clippy::cast_precision_loss)]
pub fn seconds(now: Instant) -> f64 {
    now.as_micros() as f64 / 1_000_000.0
}
