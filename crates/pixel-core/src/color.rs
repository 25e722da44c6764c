//! RGB color value and its HSV form.

use serde::{Deserialize, Serialize};

/// RGB color value as read from the screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a hex string (e.g., "#FF0000" or "FF0000").
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

        Some(Self { r, g, b })
    }

    /// Uppercase `#RRGGBB`.
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Packed `0x00RRGGBB`, the layout used by software frame buffers.
    pub fn to_xrgb(&self) -> u32 {
        (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    /// Hue, saturation and value as whole percentages.
    ///
    /// Each component is the exact ratio rounded half up, so ties such as a
    /// hue of 59.5% show as 60%.
    pub fn hsv_percentages(&self) -> [u8; 3] {
        let (r, g, b) = (self.r as u32, self.g as u32, self.b as u32);
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let hue = if delta == 0 {
            0
        } else {
            // Position within the 6 * delta hue circle.
            let position = if max == r {
                (6 * delta + g - b) % (6 * delta)
            } else if max == g {
                2 * delta + b - r
            } else {
                4 * delta + r - g
            };
            percent_of(position, 6 * delta)
        };
        let saturation = if max == 0 { 0 } else { percent_of(delta, max) };
        let value = percent_of(max, 255);

        [hue, saturation, value]
    }
}

/// `numerator / denominator` as a percentage, rounded half up and capped at 100.
fn percent_of(numerator: u32, denominator: u32) -> u8 {
    let rounded = (200 * numerator + denominator) / (2 * denominator);
    rounded.min(100) as u8
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
