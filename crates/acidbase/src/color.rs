use std::{fmt, ops::Range, str::FromStr};

use crate::Error;

/// An sRGB color for an auxiliary curve.
///
/// Parses from `#rrggbb` hex strings and a handful of common names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    fn named(name: &str) -> Option<Self> {
        let color = match name {
            "black" => Self::rgb(0, 0, 0),
            "white" => Self::rgb(255, 255, 255),
            "red" => Self::rgb(214, 39, 40),
            "green" => Self::rgb(44, 160, 44),
            "blue" => Self::rgb(31, 119, 180),
            "orange" => Self::rgb(255, 127, 14),
            "purple" => Self::rgb(148, 103, 189),
            "brown" => Self::rgb(140, 86, 75),
            "pink" => Self::rgb(227, 119, 194),
            "gray" | "grey" => Self::rgb(127, 127, 127),
            "olive" => Self::rgb(188, 189, 34),
            "cyan" => Self::rgb(23, 190, 207),
            _ => return None,
        };
        Some(color)
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || Error::InvalidInput(format!("`{s}` is not a color"));

        if let Some(hex) = trimmed.strip_prefix('#') {
            if hex.len() != 6 || !hex.is_ascii() {
                return Err(invalid());
            }
            let channel =
                |range: Range<usize>| u8::from_str_radix(&hex[range], 16).map_err(|_| invalid());
            return Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?));
        }

        Self::named(&trimmed.to_ascii_lowercase()).ok_or_else(invalid)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}
