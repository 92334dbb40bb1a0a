//! Placement of bulbs along the wire
//!
//! Bulbs hang at a fixed spacing across the surface width, centered, on a
//! wire that sags and rises with a sine of the bulb index. Upside-down bulbs
//! hang below the wire, the others stand on top of it.

use core::f32::consts::FRAC_PI_4;

use crate::bulb::BulbState;

/// Geometry of the light string, in surface units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StringLayout {
    /// Horizontal distance between bulbs
    pub spacing: f32,
    /// Vertical swing of the wire
    pub amplitude: f32,
    /// Height of a bulb
    pub bulb_size: f32,
    /// Vertical position of the wire's rest line
    pub baseline: f32,
}

impl Default for StringLayout {
    fn default() -> Self {
        Self {
            spacing: 60.0,
            amplitude: 10.0,
            bulb_size: 30.0,
            baseline: 24.0,
        }
    }
}

/// Where to draw one bulb
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BulbPlacement {
    /// Bulb center
    pub x: f32,
    pub y: f32,
    /// Rotation in degrees
    pub rotation: f32,
}

impl StringLayout {
    /// Number of bulbs that fit across `width`
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn bulb_count(&self, width: f32) -> usize {
        if width <= 0.0 || self.spacing <= 0.0 {
            return 0;
        }
        libm::floorf(width / self.spacing) as usize + 1
    }

    /// Left margin that centers `count` bulbs across `width`
    #[allow(clippy::cast_precision_loss)]
    pub fn starting_offset(&self, width: f32, count: usize) -> f32 {
        let span = count.saturating_sub(1) as f32 * self.spacing;
        (width - span) / 2.0
    }

    /// Point on the wire where bulb `index` is attached
    #[allow(clippy::cast_precision_loss)]
    pub fn wire_point(&self, index: usize, offset: f32) -> (f32, f32) {
        let x = offset + index as f32 * self.spacing;
        let y = self.baseline + libm::sinf(index as f32 * FRAC_PI_4) * self.amplitude;
        (x, y)
    }

    /// Placement of bulb `index` for a string centered with `offset`
    pub fn place(&self, index: usize, offset: f32, bulb: &BulbState) -> BulbPlacement {
        let (x, wire_y) = self.wire_point(index, offset);
        let lift = if bulb.is_upside_down { 0.0 } else { -self.bulb_size };
        BulbPlacement {
            x,
            y: wire_y + self.bulb_size / 2.0 + lift,
            rotation: bulb.rotation,
        }
    }

    /// Placements of every bulb across `width`
    pub fn place_all<'b>(
        &self,
        width: f32,
        bulbs: &'b [BulbState],
    ) -> impl Iterator<Item = BulbPlacement> + 'b {
        let layout = *self;
        let offset = layout.starting_offset(width, bulbs.len());
        bulbs
            .iter()
            .enumerate()
            .map(move |(index, bulb)| layout.place(index, offset, bulb))
    }
}
