//! RGB colors parsed from `#rgb`, `#rrggbb`, or a small set of names.

use std::fmt;

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    /// Create a color from its components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse hex digits without the leading `#` (3 or 6 digits).
    pub fn from_hex(hex: &str) -> Option<Color> {
        let digit = |c: u8| -> Option<u8> { (c as char).to_digit(16).map(|d| d as u8) };
        let bytes = hex.as_bytes();
        match bytes.len() {
            3 => {
                let r = digit(bytes[0])?;
                let g = digit(bytes[1])?;
                let b = digit(bytes[2])?;
                Some(Color::rgb(r * 17, g * 17, b * 17))
            }
            6 => {
                let pair = |i: usize| -> Option<u8> { Some(digit(bytes[i])? * 16 + digit(bytes[i + 1])?) };
                Some(Color::rgb(pair(0)?, pair(2)?, pair(4)?))
            }
            _ => None,
        }
    }

    /// Look up a named color.
    pub fn from_name(name: &str) -> Option<Color> {
        let color = match name.to_ascii_lowercase().as_str() {
            "black" => Color::BLACK,
            "white" => Color::WHITE,
            "red" => Color::rgb(255, 0, 0),
            "green" => Color::rgb(0, 128, 0),
            "blue" => Color::rgb(0, 0, 255),
            "gray" | "grey" => Color::rgb(128, 128, 128),
            "yellow" => Color::rgb(255, 255, 0),
            _ => return None,
        };
        Some(color)
    }

    /// Mix towards white by `amount` in 0..=255 (used for hover/pressed shades).
    pub fn lighten(self, amount: u8) -> Color {
        let up = |c: u8| c.saturating_add(((255 - c as u16) * amount as u16 / 255) as u8);
        Color::rgb(up(self.r), up(self.g), up(self.b))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}
