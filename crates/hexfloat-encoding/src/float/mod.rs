//! Floating point record formats.
//!
//! - **Fields**: sign/exponent/mantissa slicing of 4- and 8-byte records
//! - **HFP**: IBM hexadecimal floating point decode and encode
//! - **IEEE**: big-endian IEEE 754 binary32/binary64 records
//! - **Clamp**: the zero-clamp overflow policy applied before encoding

mod clamp;
mod fields;
mod hfp;
mod ieee;

pub use clamp::{clamp_and_convert, Clamped};
pub use fields::{extract, BitFields, EXPONENT_MAX};
pub use hfp::{
    decode_ibm, decode_ibm_double, decode_ibm_single, encode_ibm, encode_ibm_double,
    encode_ibm_single, IBM_MIN_NORMAL,
};
pub use ieee::{decode_ieee_double, decode_ieee_single, encode_ieee_double, encode_ieee_single};

use crate::error::EncodingError;

/// Result type for float operations.
pub type Result<T> = std::result::Result<T, EncodingError>;

/// Sign bit of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    /// Sign bit 0.
    Positive,
    /// Sign bit 1.
    Negative,
}

impl Sign {
    /// Interpret the low bit of `bit` as a sign bit.
    pub fn from_bit(bit: u8) -> Self {
        if bit & 1 == 1 {
            Sign::Negative
        } else {
            Sign::Positive
        }
    }

    /// Sign of a value. Negative zero counts as negative.
    pub fn of(value: f64) -> Self {
        if value.is_sign_negative() {
            Sign::Negative
        } else {
            Sign::Positive
        }
    }

    pub fn bit(self) -> u8 {
        match self {
            Sign::Positive => 0,
            Sign::Negative => 1,
        }
    }

    /// `1.0` or `-1.0`.
    pub fn multiplier(self) -> f64 {
        match self {
            Sign::Positive => 1.0,
            Sign::Negative => -1.0,
        }
    }
}

/// One encoded output record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Record {
    /// 4-byte record (IBM short or IEEE single).
    Short([u8; 4]),
    /// 8-byte record (IBM long or IEEE double).
    Long([u8; 8]),
}

impl Record {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Record::Short(bytes) => bytes,
            Record::Long(bytes) => bytes,
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

impl AsRef<[u8]> for Record {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_from_bit() {
        assert_eq!(Sign::from_bit(0), Sign::Positive);
        assert_eq!(Sign::from_bit(1), Sign::Negative);
        assert_eq!(Sign::from_bit(0b11), Sign::Negative);
    }

    #[test]
    fn test_sign_of_value() {
        assert_eq!(Sign::of(2.5), Sign::Positive);
        assert_eq!(Sign::of(-2.5), Sign::Negative);
        assert_eq!(Sign::of(-0.0), Sign::Negative);
        assert_eq!(Sign::of(0.0), Sign::Positive);
    }

    #[test]
    fn test_sign_multiplier() {
        assert_eq!(Sign::Positive.multiplier() * 3.0, 3.0);
        assert_eq!(Sign::Negative.multiplier() * 3.0, -3.0);
        assert!((Sign::Negative.multiplier() * 0.0).is_sign_negative());
    }

    #[test]
    fn test_record_bytes() {
        let short = Record::Short([0x41, 0x10, 0x00, 0x00]);
        assert_eq!(short.len(), 4);
        assert_eq!(short.as_bytes(), &[0x41, 0x10, 0x00, 0x00]);

        let long = Record::Long([0x3F, 0xF0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(long.as_ref().len(), 8);
        assert!(!long.is_empty());
    }
}
