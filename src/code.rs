//! Identity codes and their bit-field decoding.
//!
//! An identity code is 32 bits. Wider integers are accepted and truncated
//! to their low 32 bits (two's complement), the way a big integer narrows
//! to an `int`.
//!
//! Reference layout, bit 0 = LSB:
//!
//! ```text
//!  0-1   middle patch (via CENTER_PATCH_TYPES)
//!  2     middle invert
//!  3-6   corner patch
//!  7     corner invert
//!  8-9   corner turn
//!  10-13 side patch
//!  14    side invert
//!  15-16 side turn
//!  16-20 blue
//!  21-25 green
//!  27-31 red
//! ```
//!
//! Bit 16 feeds both the side turn and blue, and bit 26 is never read.
//! [`FieldLayout::Disjoint`] removes the overlap by moving the color
//! fields up one bit.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Center patches are limited to these (fully symmetric) catalog entries.
pub const CENTER_PATCH_TYPES: [usize; 4] = [0, 4, 8, 15];

// ============================================================================
// IdentityCode
// ============================================================================

/// A 32-bit identity code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct IdentityCode(u32);

impl IdentityCode {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u32 {
        self.0
    }

    /// Low 32 bits of a big-endian two's-complement integer of any length.
    ///
    /// Inputs shorter than four bytes are sign-extended; an empty slice is
    /// zero.
    pub fn from_be_bytes(bytes: &[u8]) -> Self {
        let fill = match bytes.first() {
            Some(b) if b & 0x80 != 0 => 0xFF,
            _ => 0x00,
        };
        let mut word = [fill; 4];
        let tail = &bytes[bytes.len().saturating_sub(4)..];
        word[4 - tail.len()..].copy_from_slice(tail);
        Self(u32::from_be_bytes(word))
    }

    /// The first four bytes of a hash digest, big-endian. Missing bytes
    /// count as zero.
    pub fn from_digest(digest: &[u8]) -> Self {
        let mut word = [0u8; 4];
        let head = &digest[..digest.len().min(4)];
        word[..head.len()].copy_from_slice(head);
        Self(u32::from_be_bytes(word))
    }

    #[inline]
    fn bits(self, shift: u32, mask: u32) -> u32 {
        (self.0 >> shift) & mask
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for IdentityCode {
                fn from(v: $t) -> Self {
                    // Truncating cast keeps the low 32 bits.
                    Self(v as u32)
                }
            }
        )*
    };
}

impl_from_int!(u32, i32, u64, i64, u128, i128, usize, isize);

impl From<IdentityCode> for u32 {
    fn from(code: IdentityCode) -> Self {
        code.0
    }
}

impl fmt::Display for IdentityCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

impl fmt::LowerHex for IdentityCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

/// Failure to parse an identity code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid identity code `{0}`: expected a decimal or 0x-prefixed hex integer")]
pub struct ParseCodeError(pub String);

impl FromStr for IdentityCode {
    type Err = ParseCodeError;

    /// Accepts decimal (optionally negative) or `0x` hex of any length;
    /// hex wider than 32 bits keeps its last eight digits.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseCodeError(s.to_string());
        let t = s.trim();
        if let Some(hex) = t.strip_prefix("0x").or_else(|| t.strip_prefix("0X")) {
            let hex = hex.replace('_', "");
            if hex.is_empty() || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(err());
            }
            let low = &hex[hex.len().saturating_sub(8)..];
            return u32::from_str_radix(low, 16).map(Self).map_err(|_| err());
        }
        t.parse::<i128>().map(Self::from).map_err(|_| err())
    }
}

// ============================================================================
// Field layout
// ============================================================================

/// Bit positions of the color and side-turn fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldLayout {
    /// Side turn 15-16, blue 16-20, green 21-25, red 27-31.
    #[default]
    Reference,
    /// Side turn 15-16, blue 17-21, green 22-26, red 27-31.
    Disjoint,
}

impl FieldLayout {
    /// Split a code into render parameters. Total over all inputs.
    pub fn decode(self, code: IdentityCode) -> RenderSpec {
        let (blue_shift, green_shift) = match self {
            FieldLayout::Reference => (16, 21),
            FieldLayout::Disjoint => (17, 22),
        };
        RenderSpec {
            middle_type: CENTER_PATCH_TYPES[code.bits(0, 0x3) as usize],
            middle_invert: code.bits(2, 0x1) != 0,
            corner_type: code.bits(3, 0xF) as usize,
            corner_invert: code.bits(7, 0x1) != 0,
            corner_turn: code.bits(8, 0x3),
            side_type: code.bits(10, 0xF) as usize,
            side_invert: code.bits(14, 0x1) != 0,
            side_turn: code.bits(15, 0x3),
            blue: code.bits(blue_shift, 0x1F) as u8,
            green: code.bits(green_shift, 0x1F) as u8,
            red: code.bits(27, 0x1F) as u8,
        }
    }
}

impl FromStr for FieldLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "reference" => Ok(FieldLayout::Reference),
            "disjoint" => Ok(FieldLayout::Disjoint),
            other => Err(format!("unknown field layout `{}`", other)),
        }
    }
}

// ============================================================================
// RenderSpec
// ============================================================================

/// Parameters decoded from one identity code.
///
/// Patch types and turns are kept as decoded; they are reduced modulo the
/// catalog length and 4 only when drawn. Color channels are 5-bit values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderSpec {
    pub middle_type: usize,
    pub middle_invert: bool,
    pub corner_type: usize,
    pub corner_invert: bool,
    pub corner_turn: u32,
    pub side_type: usize,
    pub side_invert: bool,
    pub side_turn: u32,
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

/// Decode with the reference layout.
pub fn decode(code: impl Into<IdentityCode>) -> RenderSpec {
    FieldLayout::Reference.decode(code.into())
}

// ============================================================================
// Tests
// ============================================================================
