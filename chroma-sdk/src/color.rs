//! RGB color type and native COLORREF conversion

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ChromaError;

/// RGB color value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    /// Create a new RGB color
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a `0xRRGGBB` value (upper byte ignored)
    pub const fn from_rgb_hex(value: u32) -> Self {
        Self {
            r: (value >> 16) as u8,
            g: (value >> 8) as u8,
            b: value as u8,
        }
    }

    /// Native COLORREF layout: `0x00BBGGRR`
    pub const fn to_colorref(self) -> u32 {
        (self.r as u32) | ((self.g as u32) << 8) | ((self.b as u32) << 16)
    }

    /// Black (all LEDs off)
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0 };
    /// White (all LEDs full)
    pub const WHITE: Self = Self {
        r: 255,
        g: 255,
        b: 255,
    };
    /// Red
    pub const RED: Self = Self { r: 255, g: 0, b: 0 };
    /// Green
    pub const GREEN: Self = Self { r: 0, g: 255, b: 0 };
    /// Blue
    pub const BLUE: Self = Self { r: 0, g: 0, b: 255 };
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for RgbColor {
    type Err = ChromaError;

    /// Parse `#RRGGBB`, `RRGGBB`, `0xRRGGBB` or a basic color name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "black" | "off" => return Ok(Self::BLACK),
            "white" => return Ok(Self::WHITE),
            "red" => return Ok(Self::RED),
            "green" => return Ok(Self::GREEN),
            "blue" => return Ok(Self::BLUE),
            _ => {}
        }

        let hex = s
            .strip_prefix('#')
            .or_else(|| s.strip_prefix("0x"))
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);

        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ChromaError::invalid(
                "color",
                format!("'{s}' is not a color (expected #RRGGBB or a color name)"),
            ));
        }

        u32::from_str_radix(hex, 16)
            .map(Self::from_rgb_hex)
            .map_err(|e| ChromaError::invalid("color", format!("'{s}': {e}")))
    }
}

impl TryFrom<String> for RgbColor {
    type Error = ChromaError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RgbColor> for String {
    fn from(color: RgbColor) -> Self {
        color.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colorref_layout() {
        assert_eq!(RgbColor::RED.to_colorref(), 0x0000_00FF);
        assert_eq!(RgbColor::GREEN.to_colorref(), 0x0000_FF00);
        assert_eq!(RgbColor::BLUE.to_colorref(), 0x00FF_0000);
        assert_eq!(RgbColor::new(0x12, 0x34, 0x56).to_colorref(), 0x0056_3412);
    }

    #[test]
    fn test_from_rgb_hex() {
        assert_eq!(RgbColor::from_rgb_hex(0xFF0000), RgbColor::RED);
        assert_eq!(RgbColor::from_rgb_hex(0x00FF00), RgbColor::GREEN);
        assert_eq!(RgbColor::from_rgb_hex(0xFF_0000FF), RgbColor::BLUE);
    }

    #[test]
    fn test_parse() {
        assert_eq!("#FF0000".parse::<RgbColor>().unwrap(), RgbColor::RED);
        assert_eq!("00ff00".parse::<RgbColor>().unwrap(), RgbColor::GREEN);
        assert_eq!("0x0000FF".parse::<RgbColor>().unwrap(), RgbColor::BLUE);
        assert_eq!("White".parse::<RgbColor>().unwrap(), RgbColor::WHITE);
        assert_eq!(
            "#123456".parse::<RgbColor>().unwrap(),
            RgbColor::new(0x12, 0x34, 0x56)
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", "#FFF", "#GG0000", "purple", "#FF00001"] {
            let err = bad.parse::<RgbColor>().unwrap_err();
            assert!(
                matches!(err, ChromaError::InvalidEffectParameters { .. }),
                "{bad}"
            );
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(RgbColor::new(1, 2, 0xAB).to_string(), "#0102AB");
    }
}
