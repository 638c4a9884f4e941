//! Color types and operations.
//!
//! `Rgba8` is the only color type the renderer needs: 8 bits per channel,
//! non-premultiplied alpha. Besides the fixed-point blending helpers used by
//! the pixel format layer it carries the two operations the identicon color
//! policy is built on, Euclidean RGB distance and the 24-bit complement.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::basics::CoverType;

// ============================================================================
// Rgba8
// ============================================================================

/// RGBA color with u8 components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const BASE_SHIFT: u32 = 8;
    pub const BASE_SCALE: u32 = 1 << Self::BASE_SHIFT;
    pub const BASE_MASK: u32 = Self::BASE_SCALE - 1;
    pub const BASE_MSB: u32 = 1 << (Self::BASE_SHIFT - 1);

    pub const WHITE: Rgba8 = Rgba8 {
        r: 255,
        g: 255,
        b: 255,
        a: 255,
    };
    pub const BLACK: Rgba8 = Rgba8 {
        r: 0,
        g: 0,
        b: 0,
        a: 255,
    };
    pub const TRANSPARENT: Rgba8 = Rgba8 {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn new_opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Build an opaque color from channel values wider than 8 bits, keeping
    /// only the low byte of each (the packed-integer convention).
    pub fn from_channels(r: u32, g: u32, b: u32) -> Self {
        Self::new_opaque(r as u8, g as u8, b as u8)
    }

    /// Unpack a `0xAARRGGBB` integer.
    pub const fn from_argb(argb: u32) -> Self {
        Self {
            a: (argb >> 24) as u8,
            r: (argb >> 16) as u8,
            g: (argb >> 8) as u8,
            b: argb as u8,
        }
    }

    /// Pack into a `0xAARRGGBB` integer.
    pub const fn to_argb(self) -> u32 {
        (self.a as u32) << 24 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    pub fn is_opaque(&self) -> bool {
        self.a == Self::BASE_MASK as u8
    }

    /// Euclidean distance between two colors in RGB space (alpha ignored).
    pub fn distance(&self, other: &Rgba8) -> f64 {
        let dr = self.r as f64 - other.r as f64;
        let dg = self.g as f64 - other.g as f64;
        let db = self.b as f64 - other.b as f64;
        (dr * dr + dg * dg + db * db).sqrt()
    }

    /// The complementary color: the low 24 bits of the packed value
    /// inverted, alpha left as is.
    pub const fn complement(self) -> Self {
        Self::from_argb(self.to_argb() ^ 0x00FF_FFFF)
    }

    /// Fixed-point multiply, exact over u8.
    #[inline]
    pub fn multiply(a: u8, b: u8) -> u8 {
        let t: u32 = a as u32 * b as u32 + Self::BASE_MSB;
        (((t >> Self::BASE_SHIFT) + t) >> Self::BASE_SHIFT) as u8
    }

    /// Multiply a color component by a cover.
    #[inline]
    pub fn mult_cover(a: u8, b: CoverType) -> u8 {
        Self::multiply(a, b)
    }

    /// Interpolate p to q by a.
    #[inline]
    pub fn lerp(p: u8, q: u8, a: u8) -> u8 {
        let t = (q as i32 - p as i32) * a as i32 + Self::BASE_MSB as i32 - (p > q) as i32;
        (p as i32 + (((t >> Self::BASE_SHIFT) + t) >> Self::BASE_SHIFT)) as u8
    }

    /// `#rrggbb` for opaque colors, `#rrggbbaa` otherwise.
    pub fn to_hex(&self) -> String {
        if self.is_opaque() {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl fmt::Display for Rgba8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

// ============================================================================
// Hex parsing
// ============================================================================

/// Failure to parse a `#rrggbb` / `#rrggbbaa` color string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("color `{0}` must be #rrggbb or #rrggbbaa")]
    BadLength(String),
    #[error("color `{0}` contains a non-hex digit")]
    BadDigit(String),
}

impl FromStr for Rgba8 {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.len() != 6 && digits.len() != 8 {
            return Err(ColorParseError::BadLength(s.to_string()));
        }
        let value =
            u32::from_str_radix(digits, 16).map_err(|_| ColorParseError::BadDigit(s.to_string()))?;
        Ok(if digits.len() == 6 {
            Self::from_argb(0xFF00_0000 | value)
        } else {
            Self::new((value >> 24) as u8, (value >> 16) as u8, (value >> 8) as u8, value as u8)
        })
    }
}

impl Serialize for Rgba8 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgba8 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Tests
// ============================================================================
