//! Bulb state model

use crate::color::{BulbColor, ColorChoice, Rgb};
use crate::random::RandomSource;

/// Maximum tilt applied to a bulb, in degrees
pub const ROTATION_JITTER: f32 = 10.0;

/// Phase distance between neighbouring bulbs
pub const PHASE_STEP: f32 = 0.4;

/// Upper bound of the random phase jitter
pub const PHASE_JITTER: f32 = 0.5;

/// Visual state of a single bulb
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BulbState {
    pub color: BulbColor,
    pub is_glowing: bool,
    /// Display angle in degrees
    pub rotation: f32,
    pub is_upside_down: bool,
    /// Offset added to wave modes so neighbouring bulbs drift apart
    pub phase_offset: f32,
}

impl BulbState {
    /// Create the bulb at `index` in its initial state: red, glowing, with
    /// random orientation and a phase offset that grows along the string.
    #[allow(clippy::cast_precision_loss)]
    pub fn spawn<R: RandomSource>(index: usize, rng: &mut R) -> Self {
        let is_upside_down = rng.next_bool();
        let jitter = rng.next_in(-ROTATION_JITTER, ROTATION_JITTER);
        let rotation = if is_upside_down { 180.0 + jitter } else { jitter };
        let phase_offset = index as f32 * PHASE_STEP + rng.next_in(0.0, PHASE_JITTER);

        Self {
            color: BulbColor::INITIAL,
            is_glowing: true,
            rotation,
            is_upside_down,
            phase_offset,
        }
    }

    /// Color to draw, honoring a solid color override.
    pub fn display_color(&self, choice: ColorChoice) -> BulbColor {
        choice.resolve(self.color)
    }

    /// Output color for LED style renderers: the bulb color when lit, black otherwise.
    pub fn to_rgb(&self, choice: ColorChoice) -> Rgb {
        if self.is_glowing {
            self.display_color(choice).to_rgb()
        } else {
            Rgb::default()
        }
    }
}
