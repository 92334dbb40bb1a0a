use heapless::Vec;

use crate::bulb::BulbState;
use crate::color::{ColorChoice, Rgb};
use crate::mode::LightMode;

/// A snapshot of the lights state for renderers.
///
/// Owned copy, so a renderer can hold it across a frame without locking.
#[derive(Clone, Debug, PartialEq)]
pub struct LightsSnapshot<const N: usize> {
    /// Bulbs in string order
    pub bulbs: Vec<BulbState, N>,
    /// Active light mode
    pub mode: LightMode,
    /// Whether the animation is running
    pub is_active: bool,
}

impl<const N: usize> LightsSnapshot<N> {
    /// Output colors for LED style renderers
    pub fn to_rgb(&self, choice: ColorChoice) -> Vec<Rgb, N> {
        self.bulbs.iter().map(|bulb| bulb.to_rgb(choice)).collect()
    }

    /// Number of bulbs currently lit
    pub fn glowing_count(&self) -> usize {
        self.bulbs.iter().filter(|bulb| bulb.is_glowing).count()
    }
}
