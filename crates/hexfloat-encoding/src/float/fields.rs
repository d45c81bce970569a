//! Bit-field extraction for fixed-width floating point records.
//!
//! Both IBM widths share one layout, read big-endian from the first byte:
//!
//! ```text
//! bit  0      sign
//! bits 1-7    exponent (excess-64, base 16)
//! bits 8..    mantissa (24 bits short, 56 bits long)
//! ```

use super::{Result, Sign};
use crate::error::EncodingError;
use crate::format::Width;

/// Largest value of the 7-bit exponent field.
pub const EXPONENT_MAX: u8 = 0x7F;

/// Structured view of one fixed-width record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitFields {
    sign: Sign,
    exponent: u8,
    mantissa: u64,
    width: Width,
}

impl BitFields {
    /// Build fields from their parts, checking each against its bit width.
    pub fn new(sign: Sign, exponent: u8, mantissa: u64, width: Width) -> Result<Self> {
        if exponent > EXPONENT_MAX {
            return Err(EncodingError::InvalidField {
                field: "exponent",
                value: exponent as u64,
                max: EXPONENT_MAX as u64,
            });
        }
        let max = mantissa_mask(width);
        if mantissa > max {
            return Err(EncodingError::InvalidField {
                field: "mantissa",
                value: mantissa,
                max,
            });
        }
        Ok(Self {
            sign,
            exponent,
            mantissa,
            width,
        })
    }

    /// All-zero fields of the given width.
    pub const fn zero(width: Width) -> Self {
        Self {
            sign: Sign::Positive,
            exponent: 0,
            mantissa: 0,
            width,
        }
    }

    pub fn sign(&self) -> Sign {
        self.sign
    }

    pub fn exponent(&self) -> u8 {
        self.exponent
    }

    pub fn mantissa(&self) -> u64 {
        self.mantissa
    }

    pub fn width(&self) -> Width {
        self.width
    }

    /// Slice a right-aligned record integer into fields.
    pub(crate) fn from_bits(bits: u64, width: Width) -> Self {
        let mantissa_bits = width.mantissa_bits();
        Self {
            sign: Sign::from_bit((bits >> (width.bits() - 1)) as u8),
            exponent: (bits >> mantissa_bits) as u8 & EXPONENT_MAX,
            mantissa: bits & mantissa_mask(width),
            width,
        }
    }

    /// The whole record as an unsigned integer, right-aligned.
    pub fn to_bits(&self) -> u64 {
        let shift = self.width.mantissa_bits();
        ((self.sign.bit() as u64) << (shift + 7)) | ((self.exponent as u64) << shift) | self.mantissa
    }

    /// Pack the fields back into big-endian record bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let bits = self.to_bits();
        match self.width {
            Width::Single => (bits as u32).to_be_bytes().to_vec(),
            Width::Double => bits.to_be_bytes().to_vec(),
        }
    }

    /// Widen a short record to long by appending 32 zero bits.
    ///
    /// Sign and exponent are unchanged; the mantissa gains 32 low zero bits,
    /// so the decoded value is identical. Long fields are returned as-is.
    pub fn pad_to_double(self) -> Self {
        match self.width {
            Width::Single => Self {
                mantissa: self.mantissa << 32,
                width: Width::Double,
                ..self
            },
            Width::Double => self,
        }
    }

    /// Narrow a long record to short by keeping its leading 32 bits.
    ///
    /// The low 32 mantissa bits are discarded without rounding.
    pub fn truncate_to_single(self) -> Self {
        match self.width {
            Width::Double => Self {
                mantissa: self.mantissa >> 32,
                width: Width::Single,
                ..self
            },
            Width::Single => self,
        }
    }
}

fn mantissa_mask(width: Width) -> u64 {
    (1u64 << width.mantissa_bits()) - 1
}

/// Slice a record into sign, exponent and mantissa.
///
/// The record must be exactly `width.record_len()` bytes.
pub fn extract(record: &[u8], width: Width) -> Result<BitFields> {
    let expected = width.record_len();
    if record.len() != expected {
        return Err(EncodingError::MalformedRecord {
            expected,
            actual: record.len(),
        });
    }

    let bits = record
        .iter()
        .fold(0u64, |acc, &byte| (acc << 8) | byte as u64);
    Ok(BitFields::from_bits(bits, width))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_quarter() {
        let fields = extract(&[0x40, 0x40, 0x00, 0x00], Width::Single).unwrap();
        assert_eq!(fields.sign(), Sign::Positive);
        assert_eq!(fields.exponent(), 64);
        assert_eq!(fields.mantissa(), 0x40_0000);
        assert_eq!(fields.width(), Width::Single);
    }

    #[test]
    fn test_extract_negative_long() {
        let bytes = [0xC2, 0x76, 0xA0, 0x00, 0x00, 0x00, 0x00, 0x01];
        let fields = extract(&bytes, Width::Double).unwrap();
        assert_eq!(fields.sign(), Sign::Negative);
        assert_eq!(fields.exponent(), 0x42);
        assert_eq!(fields.mantissa(), 0x76_A000_0000_0001);
    }

    #[test]
    fn test_extract_small_values_keep_leading_zeros() {
        // An integer this small would print with no leading zero bits; the
        // field boundaries must not shift because of that.
        let fields = extract(&[0x00, 0x00, 0x00, 0x01], Width::Single).unwrap();
        assert_eq!(fields.sign(), Sign::Positive);
        assert_eq!(fields.exponent(), 0);
        assert_eq!(fields.mantissa(), 1);

        let fields = extract(&[0u8; 8], Width::Double).unwrap();
        assert_eq!(fields, BitFields::zero(Width::Double));
    }

    #[test]
    fn test_extract_wrong_length() {
        let err = extract(&[0x41, 0x10, 0x00], Width::Single).unwrap_err();
        assert!(matches!(
            err,
            EncodingError::MalformedRecord {
                expected: 4,
                actual: 3
            }
        ));
        assert!(extract(&[0u8; 4], Width::Double).is_err());
        assert!(extract(&[], Width::Single).is_err());
    }

    #[test]
    fn test_to_bytes_matches_input() {
        let short = [0xC1, 0x10, 0x00, 0x00];
        assert_eq!(extract(&short, Width::Single).unwrap().to_bytes(), short);

        let long = [0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF];
        assert_eq!(extract(&long, Width::Double).unwrap().to_bytes(), long);
    }

    #[test]
    fn test_new_rejects_wide_fields() {
        assert!(BitFields::new(Sign::Positive, 0x80, 0, Width::Single).is_err());
        assert!(BitFields::new(Sign::Positive, 0x41, 1 << 24, Width::Single).is_err());
        assert!(BitFields::new(Sign::Positive, 0x41, 1 << 24, Width::Double).is_ok());
        assert!(BitFields::new(Sign::Negative, 0x7F, (1 << 56) - 1, Width::Double).is_ok());
    }

    #[test]
    fn test_pad_to_double_appends_zero_bits() {
        let short = extract(&[0x41, 0x12, 0x34, 0x56], Width::Single).unwrap();
        let padded = short.pad_to_double();
        assert_eq!(padded.width(), Width::Double);
        assert_eq!(
            padded.to_bytes(),
            vec![0x41, 0x12, 0x34, 0x56, 0x00, 0x00, 0x00, 0x00]
        );
    }

    #[test]
    fn test_truncate_to_single_keeps_leading_bits() {
        let long = extract(
            &[0xC1, 0x12, 0x34, 0x56, 0x78, 0x9A, 0xBC, 0xDE],
            Width::Double,
        )
        .unwrap();
        let short = long.truncate_to_single();
        assert_eq!(short.width(), Width::Single);
        assert_eq!(short.to_bytes(), vec![0xC1, 0x12, 0x34, 0x56]);
    }

    #[test]
    fn test_width_changes_are_idempotent() {
        let long = BitFields::zero(Width::Double);
        assert_eq!(long.pad_to_double(), long);
        let short = BitFields::zero(Width::Single);
        assert_eq!(short.truncate_to_single(), short);
    }
}
