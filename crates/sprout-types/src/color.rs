//! RGB color value type and hex text conversion.
//!
//! Colors are stored as three `u8` channels, so every [`RgbColor`] is in
//! range by construction. Hex conversion follows the canvas palette format:
//! a leading `#` followed by 3 or 6 hex digits. The short form expands each
//! digit by duplication (`#f08` is `#ff0088`).
//!
//! [`RgbColor::from_hex`] never fails: unparsable text yields opaque white.
//! [`RgbColor::parse_hex`] is the strict variant that reports why.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Reasons a hex color string can be rejected by [`RgbColor::parse_hex`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorParseError {
    /// The digit count (after removing `#`) was neither 3 nor 6.
    #[error("hex color must have 3 or 6 digits, got {0}")]
    InvalidLength(usize),

    /// A character outside `0-9a-fA-F` was found.
    #[error("invalid hex digit {0:?}")]
    InvalidDigit(char),
}

/// An RGB color with 8-bit channels.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "bindings/")]
pub struct RgbColor {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl RgbColor {
    /// Opaque white, the fallback for unparsable hex text.
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Black.
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Build a color from its three channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Decompose the low 24 bits of `value` into channels (big-endian).
    pub const fn from_u24(value: u32) -> Self {
        let [_, r, g, b] = value.to_be_bytes();
        Self { r, g, b }
    }

    /// Pack the channels into a 24-bit value (big-endian).
    pub const fn to_u24(self) -> u32 {
        u32::from_be_bytes([0, self.r, self.g, self.b])
    }

    /// The channels as an `[r, g, b]` array.
    pub const fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Parse `#rgb` / `#rrggbb` text, falling back to [`RgbColor::WHITE`].
    pub fn from_hex(text: &str) -> Self {
        Self::parse_hex(text).unwrap_or(Self::WHITE)
    }

    /// Strictly parse `#rgb` / `#rrggbb` text.
    ///
    /// Surrounding whitespace is ignored and the leading `#` is optional.
    ///
    /// # Errors
    ///
    /// Returns [`ColorParseError::InvalidLength`] when the digit count is not
    /// 3 or 6, and [`ColorParseError::InvalidDigit`] for non-hex characters.
    pub fn parse_hex(text: &str) -> Result<Self, ColorParseError> {
        let trimmed = text.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);

        if let Some(bad) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidDigit(bad));
        }

        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 => digits.to_owned(),
            other => return Err(ColorParseError::InvalidLength(other)),
        };

        // Six validated hex digits always fit in a u32.
        let value = expanded
            .chars()
            .filter_map(|c| c.to_digit(16))
            .fold(0_u32, |acc, digit| acc.saturating_mul(16).saturating_add(digit));
        Ok(Self::from_u24(value))
    }

    /// Render as `#rrggbb` with lowercase, zero-padded digits.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for RgbColor {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex(s)
    }
}
