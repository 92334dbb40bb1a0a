//! Bulb colors
//!
//! The palette is a fixed set of four colors. Every bulb starts in
//! [`BulbColor::INITIAL`] and only ever holds a member of [`BulbColor::ALL`].

use serde::{Deserialize, Serialize};
use smart_leds::RGB8;

/// RGB color type used for rendering output
pub type Rgb = RGB8;

const COLOR_NAME_RED: &str = "red";
const COLOR_NAME_GREEN: &str = "green";
const COLOR_NAME_YELLOW: &str = "yellow";
const COLOR_NAME_BLUE: &str = "blue";

/// Color of a single bulb
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BulbColor {
    Red,
    Green,
    Yellow,
    Blue,
}

impl BulbColor {
    /// Every color, in palette order
    pub const ALL: [BulbColor; 4] = [Self::Red, Self::Green, Self::Yellow, Self::Blue];

    /// Number of colors in the palette
    pub const COUNT: usize = Self::ALL.len();

    /// Color every bulb holds right after setup
    pub const INITIAL: BulbColor = Self::Red;

    /// Palette without `self`, preserving palette order.
    pub fn others(self) -> [BulbColor; BulbColor::COUNT - 1] {
        let mut out = [self; BulbColor::COUNT - 1];
        let mut i = 0;
        for color in Self::ALL {
            if color != self {
                out[i] = color;
                i += 1;
            }
        }
        out
    }

    /// Colors a bulb may take once it leaves the initial state.
    pub fn non_initial() -> [BulbColor; BulbColor::COUNT - 1] {
        Self::INITIAL.others()
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Red => COLOR_NAME_RED,
            Self::Green => COLOR_NAME_GREEN,
            Self::Yellow => COLOR_NAME_YELLOW,
            Self::Blue => COLOR_NAME_BLUE,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            COLOR_NAME_RED => Some(Self::Red),
            COLOR_NAME_GREEN => Some(Self::Green),
            COLOR_NAME_YELLOW => Some(Self::Yellow),
            COLOR_NAME_BLUE => Some(Self::Blue),
            _ => None,
        }
    }

    /// Warm, slightly desaturated tone used when drawing the lit bulb.
    pub const fn to_rgb(self) -> Rgb {
        match self {
            Self::Red => Rgb { r: 230, g: 40, b: 40 },
            Self::Green => Rgb { r: 40, g: 200, b: 80 },
            Self::Yellow => Rgb { r: 255, g: 200, b: 40 },
            Self::Blue => Rgb { r: 40, g: 110, b: 255 },
        }
    }
}

/// Display-time color override
///
/// `Solid` draws every bulb in one color while the scheduler keeps running
/// its own color timers underneath.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorChoice {
    /// Bulbs show their own colors
    #[default]
    Default,
    /// Every bulb is drawn in the given color
    Solid(BulbColor),
}

const COLOR_CHOICE_DEFAULT: &str = "default";

impl ColorChoice {
    /// Resolve the color a bulb should be drawn in.
    pub fn resolve(self, own: BulbColor) -> BulbColor {
        match self {
            Self::Default => own,
            Self::Solid(color) => color,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => COLOR_CHOICE_DEFAULT,
            Self::Solid(color) => color.as_str(),
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        if s == COLOR_CHOICE_DEFAULT {
            return Some(Self::Default);
        }
        BulbColor::parse_from_str(s).map(Self::Solid)
    }
}
