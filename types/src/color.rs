use std::fmt;

use serde::{Deserialize, Serialize};

/// RGB color of a light form, one byte per channel.
///
/// Serialized as a `[red, green, blue]` array in config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct LightColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl LightColor {
    /// Brightest color; the starting point of a minimum fold ("no dimming").
    pub const WHITE: LightColor = LightColor::new(255, 255, 255);

    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Per-channel minimum of two colors.
    pub fn min(self, other: LightColor) -> LightColor {
        LightColor {
            red: self.red.min(other.red),
            green: self.green.min(other.green),
            blue: self.blue.min(other.blue),
        }
    }

    /// True if at least one channel is below 255.
    pub fn is_dimmed(self) -> bool {
        self != Self::WHITE
    }
}

impl Default for LightColor {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<[u8; 3]> for LightColor {
    fn from([red, green, blue]: [u8; 3]) -> Self {
        Self { red, green, blue }
    }
}

impl From<LightColor> for [u8; 3] {
    fn from(c: LightColor) -> Self {
        [c.red, c.green, c.blue]
    }
}

impl fmt::Display for LightColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.red, self.green, self.blue)
    }
}
