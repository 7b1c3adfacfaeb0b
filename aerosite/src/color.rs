//! Hex colors of map elements, layers and statuses.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AerositeError;

/// Color of a map element.
///
/// Stored as a CSS hex string: `#rrggbb` for opaque colors, `#rrggbbaa` otherwise. Parsing also
/// accepts the `#rgb` and `#rgba` short forms and either letter case.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

impl Color {
    /// Red: `#ef4444`
    pub const RED: Color = Color::rgb(0xef, 0x44, 0x44);
    /// Orange: `#f97316`
    pub const ORANGE: Color = Color::rgb(0xf9, 0x73, 0x16);
    /// Amber: `#f59e0b`
    pub const AMBER: Color = Color::rgb(0xf5, 0x9e, 0x0b);
    /// Green: `#22c55e`
    pub const GREEN: Color = Color::rgb(0x22, 0xc5, 0x5e);
    /// Emerald: `#10b981`
    pub const EMERALD: Color = Color::rgb(0x10, 0xb9, 0x81);
    /// Cyan: `#06b6d4`
    pub const CYAN: Color = Color::rgb(0x06, 0xb6, 0xd4);
    /// Blue: `#3b82f6`
    pub const BLUE: Color = Color::rgb(0x3b, 0x82, 0xf6);
    /// Purple: `#9333ea`
    pub const PURPLE: Color = Color::rgb(0x93, 0x33, 0xea);
    /// Gray: `#6b7280`
    pub const GRAY: Color = Color::rgb(0x6b, 0x72, 0x80);

    /// Opaque color from its red, green and blue channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r,
            g,
            b,
            a: u8::MAX,
        }
    }

    /// Color from its RGBA channels.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Copy of the color with the alpha channel replaced.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Copy of the color with the alpha channel set from an opacity in `0.0..=1.0`.
    pub fn with_opacity(self, opacity: f64) -> Self {
        let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
        self.with_alpha(alpha)
    }

    /// `[r, g, b, a]` channels.
    pub const fn channels(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Returns true if the alpha channel is at its maximum.
    pub const fn is_opaque(&self) -> bool {
        self.a == u8::MAX
    }

    /// CSS hex form of the color.
    pub fn to_hex(&self) -> String {
        self.to_string()
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if !self.is_opaque() {
            write!(f, "{:02x}", self.a)?;
        }

        Ok(())
    }
}

impl FromStr for Color {
    type Err = AerositeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AerositeError::InvalidColor(s.to_string());
        let digits = s.strip_prefix('#').ok_or_else(invalid)?;
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let nibble = |i: usize| u8::from_str_radix(&digits[i..i + 1], 16).map(|v| v * 0x11);
        let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16);

        let channels = match digits.len() {
            3 => [nibble(0), nibble(1), nibble(2), Ok(u8::MAX)],
            4 => [nibble(0), nibble(1), nibble(2), nibble(3)],
            6 => [byte(0), byte(2), byte(4), Ok(u8::MAX)],
            8 => [byte(0), byte(2), byte(4), byte(6)],
            _ => return Err(invalid()),
        };

        match channels {
            [Ok(r), Ok(g), Ok(b), Ok(a)] => Ok(Self::rgba(r, g, b, a)),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = AerositeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn hex_forms() {
        assert_eq!("#3B82F6".parse::<Color>().unwrap(), Color::BLUE);
        assert_eq!("#f00".parse::<Color>().unwrap(), Color::rgb(255, 0, 0));
        assert_eq!(
            "#f008".parse::<Color>().unwrap(),
            Color::rgba(255, 0, 0, 0x88)
        );
        assert_eq!(
            "#ff100080".parse::<Color>().unwrap().channels(),
            [0xff, 0x10, 0x00, 0x80]
        );
    }

    #[test]
    fn invalid_hex() {
        for value in ["3b82f6", "#3b82f", "#gggggg", "#ÿÿÿ", "", "#"] {
            assert_matches!(
                value.parse::<Color>(),
                Err(AerositeError::InvalidColor(v)) if v == value
            );
        }
        assert!(serde_json::from_str::<Color>("\"blue\"").is_err());
    }

    #[test]
    fn serialized_as_css_hex() {
        assert_eq!(
            serde_json::to_value(Color::BLUE).unwrap(),
            serde_json::json!("#3b82f6")
        );
        assert_eq!(Color::RED.with_opacity(0.5).to_hex(), "#ef444480");
        assert!(!Color::RED.with_alpha(0).is_opaque());

        let parsed: Color = serde_json::from_str("\"#EF444480\"").unwrap();
        assert_eq!(parsed, Color::RED.with_alpha(0x80));
    }
}
