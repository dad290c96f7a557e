//! KML colors.
//!
//! KML encodes colors as eight hex digits in `aabbggrr` order: alpha first,
//! then blue, green and red. Decoding never fails; whatever cannot be scanned
//! contributes zero bits, so an empty or garbage string is transparent black.

use serde::{Serialize, Serializer};
use std::fmt;

/// An RGBA color with every channel normalized to `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgba {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Rgba {
    /// Fully transparent black, the result of decoding an unusable string.
    pub const TRANSPARENT: Rgba = Rgba {
        red: 0.0,
        green: 0.0,
        blue: 0.0,
        alpha: 0.0,
    };

    /// Decode a KML `aabbggrr` hex string.
    ///
    /// Leading whitespace and an optional `#` or `0x` prefix are skipped, then
    /// the leading run of hex digits is read. A run too long for 32 bits
    /// saturates to `ffffffff`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use kml_lite::Rgba;
    ///
    /// let red = Rgba::from_kml_hex("ff0000ff");
    /// assert_eq!(red, Rgba { red: 1.0, green: 0.0, blue: 0.0, alpha: 1.0 });
    /// ```
    pub fn from_kml_hex(text: &str) -> Self {
        Self::from_abgr(scan_hex_u32(text))
    }

    /// Build a color from a packed `aabbggrr` value.
    pub fn from_abgr(packed: u32) -> Self {
        let channel = |shift: u32| f64::from((packed >> shift) & 0xff) / 255.0;
        Self {
            red: channel(0),
            green: channel(8),
            blue: channel(16),
            alpha: channel(24),
        }
    }

    /// Pack the color back into `aabbggrr` form.
    pub fn to_abgr(&self) -> u32 {
        let byte = |value: f64| (value.clamp(0.0, 1.0) * 255.0).round() as u32;
        (byte(self.alpha) << 24)
            | (byte(self.blue) << 16)
            | (byte(self.green) << 8)
            | byte(self.red)
    }

    /// The color as a KML hex string, e.g. `ff0000ff` for opaque red.
    pub fn to_kml_hex(&self) -> String {
        format!("{:08x}", self.to_abgr())
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.to_abgr())
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_kml_hex())
    }
}

fn scan_hex_u32(text: &str) -> u32 {
    let text = text.trim_start();
    let digits = text
        .strip_prefix('#')
        .or_else(|| text.strip_prefix("0x"))
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);

    digits
        .chars()
        .map_while(|c| c.to_digit(16))
        .fold(0u32, |value, digit| {
            value
                .checked_mul(16)
                .and_then(|v| v.checked_add(digit))
                .unwrap_or(u32::MAX)
        })
}
