//! Record formats and widths.
//!
//! Every record in a stream has one of four formats. The format fixes the
//! record width, how the bits are interpreted, and the largest magnitude
//! that can be written without being zero-clamped.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EncodingError;

/// Largest magnitude written to IEEE single precision before zero-clamping.
pub const MAX_SINGLE: f64 = 3.402_823_5e38;

/// Largest magnitude written to IEEE double precision before zero-clamping.
pub const MAX_DOUBLE: f64 = f64::MAX;

/// Record width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Width {
    /// 32 bits, 4 bytes.
    Single,
    /// 64 bits, 8 bytes.
    Double,
}

impl Width {
    /// Total number of bits in a record.
    pub const fn bits(self) -> u32 {
        match self {
            Width::Single => 32,
            Width::Double => 64,
        }
    }

    /// Number of bytes in a record.
    pub const fn record_len(self) -> usize {
        (self.bits() / 8) as usize
    }

    /// Number of IBM mantissa bits (everything after sign and exponent).
    pub const fn mantissa_bits(self) -> u32 {
        self.bits() - 8
    }
}

/// Source or target format of a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormatTag {
    /// IBM hexadecimal floating point, short (4 bytes).
    #[serde(rename = "ibm32")]
    IbmSingle,
    /// IBM hexadecimal floating point, long (8 bytes).
    #[serde(rename = "ibm64")]
    IbmDouble,
    /// IEEE 754 binary32, big-endian.
    #[serde(rename = "ieee32")]
    IeeeSingle,
    /// IEEE 754 binary64, big-endian.
    #[serde(rename = "ieee64")]
    IeeeDouble,
}

impl FormatTag {
    /// All supported formats.
    pub const ALL: [FormatTag; 4] = [
        FormatTag::IbmSingle,
        FormatTag::IbmDouble,
        FormatTag::IeeeSingle,
        FormatTag::IeeeDouble,
    ];

    /// Record width of this format.
    pub const fn width(self) -> Width {
        match self {
            FormatTag::IbmSingle | FormatTag::IeeeSingle => Width::Single,
            FormatTag::IbmDouble | FormatTag::IeeeDouble => Width::Double,
        }
    }

    /// Number of bytes per record.
    pub const fn record_len(self) -> usize {
        self.width().record_len()
    }

    /// Whether this is one of the IBM hexadecimal formats.
    pub const fn is_ibm(self) -> bool {
        matches!(self, FormatTag::IbmSingle | FormatTag::IbmDouble)
    }

    /// Largest magnitude that is written as-is. Anything above is zero-clamped.
    ///
    /// For IBM long the exact maximum `(1 - 16^-14) * 16^63` rounds to
    /// `16^63` in f64, which is what the comparison uses.
    pub fn max_magnitude(self) -> f64 {
        match self {
            FormatTag::IbmSingle => (1.0 - 16f64.powi(-6)) * 16f64.powi(63),
            FormatTag::IbmDouble => (1.0 - 16f64.powi(-14)) * 16f64.powi(63),
            FormatTag::IeeeSingle => MAX_SINGLE,
            FormatTag::IeeeDouble => MAX_DOUBLE,
        }
    }

    /// Short lowercase name, as accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            FormatTag::IbmSingle => "ibm32",
            FormatTag::IbmDouble => "ibm64",
            FormatTag::IeeeSingle => "ieee32",
            FormatTag::IeeeDouble => "ieee64",
        }
    }
}

impl fmt::Display for FormatTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FormatTag {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ibm32" | "ibm-single" => Ok(FormatTag::IbmSingle),
            "ibm64" | "ibm-double" => Ok(FormatTag::IbmDouble),
            "ieee32" | "ieee-single" => Ok(FormatTag::IeeeSingle),
            "ieee64" | "ieee-double" => Ok(FormatTag::IeeeDouble),
            _ => Err(EncodingError::UnsupportedFormat {
                name: s.to_string(),
            }),
        }
    }
}
