//! RGB color handling with hex parsing, luminance and mixing.

// Allow small types passed by reference for API consistency
#![allow(clippy::trivially_copy_pass_by_ref)]
// Allow intentional type casts for color math
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Relative luminance below which a color counts as "dark".
///
/// Chosen so that mid-greys such as `#777777` read as dark and pastel
/// backgrounds read as light.
pub const DARK_LUMINANCE_THRESHOLD: f64 = 0.2;

/// RGB color value with hex string representation.
///
/// Palettes carry colors as CSS strings; this type is only used where the
/// engine has to reason about a color (light/dark decisions, tinting).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RgbColor {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl RgbColor {
    /// Pure white.
    pub const WHITE: Self = Self::new(255, 255, 255);
    /// Pure black.
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Creates a new `RgbColor` from individual channel values.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses an `RgbColor` from a hex string.
    ///
    /// Supports formats: "#RRGGBB", "RRGGBB", "#RGB", "RGB" (any case).
    ///
    /// # Examples
    ///
    /// ```
    /// use posterstyle::models::RgbColor;
    ///
    /// let color = RgbColor::from_hex("#FF0000").unwrap();
    /// assert_eq!(color, RgbColor::new(255, 0, 0));
    ///
    /// let color = RgbColor::from_hex("#0f0").unwrap();
    /// assert_eq!(color, RgbColor::new(0, 255, 0));
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid hex color format.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let hex = hex.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);

        let expanded: String = match hex.len() {
            3 => hex.chars().flat_map(|c| [c, c]).collect(),
            6 => hex.to_string(),
            _ => anyhow::bail!(
                "Invalid hex color format '{hex}'. Expected 3 or 6 hex digits (RGB or RRGGBB)"
            ),
        };

        let r = u8::from_str_radix(&expanded[0..2], 16)
            .context(format!("Invalid red channel in hex color '{hex}'"))?;
        let g = u8::from_str_radix(&expanded[2..4], 16)
            .context(format!("Invalid green channel in hex color '{hex}'"))?;
        let b = u8::from_str_radix(&expanded[4..6], 16)
            .context(format!("Invalid blue channel in hex color '{hex}'"))?;

        Ok(Self::new(r, g, b))
    }

    /// Converts the color to a hex string in the format "#RRGGBB" (uppercase).
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// WCAG relative luminance in 0.0-1.0.
    #[must_use]
    pub fn relative_luminance(&self) -> f64 {
        fn linear(channel: u8) -> f64 {
            let c = f64::from(channel) / 255.0;
            if c <= 0.039_28 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }

        0.2126 * linear(self.r) + 0.7152 * linear(self.g) + 0.0722 * linear(self.b)
    }

    /// Returns true when the color reads as dark (see [`DARK_LUMINANCE_THRESHOLD`]).
    #[must_use]
    pub fn is_dark(&self) -> bool {
        self.relative_luminance() < DARK_LUMINANCE_THRESHOLD
    }

    /// Linearly mixes `other` into this color.
    ///
    /// `amount` is clamped to 0.0-1.0: 0.0 keeps `self`, 1.0 yields `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use posterstyle::models::RgbColor;
    ///
    /// let grey = RgbColor::BLACK.mix(RgbColor::WHITE, 0.5);
    /// assert_eq!(grey, RgbColor::new(128, 128, 128));
    /// ```
    #[must_use]
    pub fn mix(&self, other: Self, amount: f64) -> Self {
        let t = amount.clamp(0.0, 1.0);
        let blend = |a: u8, b: u8| -> u8 {
            (f64::from(a) + (f64::from(b) - f64::from(a)) * t)
                .round()
                .clamp(0.0, 255.0) as u8
        };
        Self {
            r: blend(self.r, other.r),
            g: blend(self.g, other.g),
            b: blend(self.b, other.b),
        }
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Returns true when `color` parses as hex and is dark.
///
/// Non-hex CSS colors (`rgb(...)`, named colors) are treated as light.
#[must_use]
pub fn is_dark_color(color: &str) -> bool {
    RgbColor::from_hex(color).is_ok_and(|c| c.is_dark())
}
