//! IBM Hexadecimal Floating Point (HFP) decoding and encoding.
//!
//! # HFP Format
//!
//! **Short (4 bytes):**
//! ```text
//! [S|EEEEEEE|FFFFFFFFFFFFFFFFFFFFFFFF]
//!  1    7              24 bits
//! ```
//!
//! **Long (8 bytes):**
//! ```text
//! [S|EEEEEEE|FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF]
//!  1    7                          56 bits
//! ```
//!
//! Value = (-1)^S * (F / 2^M) * 16^(E - 64), with M = 24 or 56.
//!
//! Unlike IEEE 754 the exponent radix is 16, there is no implicit leading
//! bit, and there is no NaN, Infinity or special exponent. A normalized
//! fraction has a non-zero leading hex digit, so up to three leading
//! fraction bits are zero and short HFP carries 21 to 24 significant bits.

use super::fields::BitFields;
use super::{Result, Sign};
use crate::error::EncodingError;
use crate::format::{FormatTag, Width};

/// Smallest normalized HFP magnitude, `16^-65`.
pub const IBM_MIN_NORMAL: f64 = 5.397_605_346_934_028e-79;

const EXCESS: i32 = 64;

/// Decode HFP fields to their numeric value.
///
/// A sign bit of 1 with a zero mantissa gives `-0.0`.
pub fn decode_ibm(fields: &BitFields) -> f64 {
    let mantissa_bits = fields.width().mantissa_bits() as i32;
    let fraction = fields.mantissa() as f64 / 2f64.powi(mantissa_bits);
    let magnitude = fraction * 16f64.powi(fields.exponent() as i32 - EXCESS);
    fields.sign().multiplier() * magnitude
}

/// Decode a 4-byte HFP short record.
pub fn decode_ibm_single(bytes: &[u8; 4]) -> f64 {
    decode_ibm(&BitFields::from_bits(u32::from_be_bytes(*bytes) as u64, Width::Single))
}

/// Decode an 8-byte HFP long record.
pub fn decode_ibm_double(bytes: &[u8; 8]) -> f64 {
    decode_ibm(&BitFields::from_bits(u64::from_be_bytes(*bytes), Width::Double))
}

/// Encode a value as HFP fields of the given width.
///
/// The hex exponent is the smallest one that puts the fraction in
/// `[1/16, 1)`. The fraction is rounded to nearest, ties to even, from the
/// exact binary significand of `value`. Magnitudes below `16^-65` are
/// stored denormalized at exponent 0 and become all-zero fields once no
/// mantissa bits remain. Zero of either sign encodes as all-zero fields.
///
/// # Errors
/// `NotRepresentable` for NaN, Infinity, and magnitudes above the largest
/// HFP value of this width.
pub fn encode_ibm(value: f64, width: Width) -> Result<BitFields> {
    let format = match width {
        Width::Single => FormatTag::IbmSingle,
        Width::Double => FormatTag::IbmDouble,
    };
    if !value.is_finite() || value.abs() > format.max_magnitude() {
        return Err(EncodingError::NotRepresentable {
            value,
            format: format.to_string(),
        });
    }
    if value == 0.0 {
        return Ok(BitFields::zero(width));
    }

    let sign = Sign::of(value);
    let (significand, exp2) = decompose(value.abs());

    // value lies in [2^(top-1), 2^top)
    let top = exp2 + (u64::BITS - significand.leading_zeros()) as i32;
    let mut hex_exp = (top + 3).div_euclid(4).max(-EXCESS);

    let mantissa_bits = width.mantissa_bits() as i32;
    let mut mantissa = scale_rounded(significand, exp2 + mantissa_bits - 4 * hex_exp);

    if mantissa >> mantissa_bits != 0 {
        // Rounding carried into a new hex digit.
        mantissa >>= 4;
        hex_exp += 1;
    }
    if mantissa == 0 {
        return Ok(BitFields::zero(width));
    }

    let biased = hex_exp + EXCESS;
    if biased > 0x7F {
        // 16^63 itself needs exponent 128; saturate to the largest value.
        return BitFields::new(sign, 0x7F, (1u64 << mantissa_bits) - 1, width);
    }
    BitFields::new(sign, biased as u8, mantissa, width)
}

/// Encode a value as a 4-byte HFP short record.
pub fn encode_ibm_single(value: f64) -> Result<[u8; 4]> {
    let fields = encode_ibm(value, Width::Single)?;
    Ok((fields.to_bits() as u32).to_be_bytes())
}

/// Encode a value as an 8-byte HFP long record.
pub fn encode_ibm_double(value: f64) -> Result<[u8; 8]> {
    let fields = encode_ibm(value, Width::Double)?;
    Ok(fields.to_bits().to_be_bytes())
}

/// Split a positive finite f64 into `significand * 2^exp2`.
fn decompose(value: f64) -> (u64, i32) {
    let bits = value.to_bits();
    let biased = ((bits >> 52) & 0x7FF) as i32;
    let fraction = bits & ((1u64 << 52) - 1);
    if biased == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1u64 << 52), biased - 1075)
    }
}

/// `significand * 2^shift`, rounded to nearest with ties to even.
fn scale_rounded(significand: u64, shift: i32) -> u64 {
    if shift >= 0 {
        return significand << shift;
    }
    let drop = shift.unsigned_abs();
    if drop >= u128::BITS {
        return 0;
    }
    let wide = significand as u128;
    let quotient = wide >> drop;
    let remainder = wide & ((1u128 << drop) - 1);
    let half = 1u128 << (drop - 1);
    let rounded = if remainder > half || (remainder == half && quotient & 1 == 1) {
        quotient + 1
    } else {
        quotient
    };
    rounded as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::float::extract;

    fn short(bytes: [u8; 4]) -> f64 {
        decode_ibm(&extract(&bytes, Width::Single).unwrap())
    }

    // ---- Decoding ----

    #[test]
    fn test_decode_quarter() {
        // sign 0, exponent 64 -> 16^0, mantissa 0x400000 / 2^24 = 0.25
        assert_eq!(short([0x40, 0x40, 0x00, 0x00]), 0.25);
    }

    #[test]
    fn test_decode_known_values() {
        assert_eq!(short([0x41, 0x10, 0x00, 0x00]), 1.0);
        assert_eq!(short([0xC1, 0x10, 0x00, 0x00]), -1.0);
        assert_eq!(short([0x40, 0x80, 0x00, 0x00]), 0.5);
        assert_eq!(short([0x42, 0x64, 0x00, 0x00]), 100.0);
        assert_eq!(short([0xC2, 0x76, 0xA0, 0x00]), -118.625);
        assert_eq!(short([0x40, 0xF0, 0x00, 0x00]), 0.9375);
    }

    #[test]
    fn test_decode_negative_zero() {
        let value = short([0x80, 0x00, 0x00, 0x00]);
        assert_eq!(value, 0.0);
        assert!(value.is_sign_negative());

        // Any exponent with a zero mantissa is still zero.
        let value = short([0xC5, 0x00, 0x00, 0x00]);
        assert_eq!(value, 0.0);
    }

    #[test]
    fn test_decode_zero_both_widths() {
        assert_eq!(decode_ibm_single(&[0u8; 4]), 0.0);
        assert_eq!(decode_ibm_double(&[0u8; 8]), 0.0);
        let padded = extract(&[0u8; 4], Width::Single).unwrap().pad_to_double();
        assert_eq!(decode_ibm(&padded), 0.0);
    }

    #[test]
    fn test_decode_long() {
        // 3.5 = 0x41 38000000000000
        let bytes = [0x41, 0x38, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00];
        assert_eq!(decode_ibm_double(&bytes), 3.5);
        let pi = [0x41, 0x32, 0x43, 0xF6, 0xA8, 0x88, 0x5A, 0x30];
        assert!((decode_ibm_double(&pi) - std::f64::consts::PI).abs() < 1e-15);
    }

    #[test]
    fn test_decode_extremes() {
        let max = decode_ibm_single(&[0x7F, 0xFF, 0xFF, 0xFF]);
        assert_eq!(max, FormatTag::IbmSingle.max_magnitude());
        assert!(max > 7.2e75 && max < 7.3e75);

        let min = decode_ibm_single(&[0x00, 0x10, 0x00, 0x00]);
        assert_eq!(min, IBM_MIN_NORMAL);

        // Unnormalized smallest value is still finite and nonzero.
        assert!(decode_ibm_double(&[0, 0, 0, 0, 0, 0, 0, 1]) > 0.0);
    }

    #[test]
    fn test_padded_decode_matches_short() {
        for bytes in [
            [0x41, 0x10, 0x00, 0x00],
            [0xC2, 0x76, 0xA0, 0x00],
            [0x3F, 0x12, 0x34, 0x56],
        ] {
            let fields = extract(&bytes, Width::Single).unwrap();
            assert_eq!(decode_ibm(&fields.pad_to_double()), decode_ibm(&fields));
        }
    }

    // ---- Encoding ----

    #[test]
    fn test_encode_one() {
        assert_eq!(encode_ibm_single(1.0).unwrap(), [0x41, 0x10, 0x00, 0x00]);
        assert_eq!(encode_ibm_single(-1.0).unwrap(), [0xC1, 0x10, 0x00, 0x00]);
        assert_eq!(
            encode_ibm_double(1.0).unwrap(),
            [0x41, 0x10, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]
        );
    }

    #[test]
    fn test_encode_known_values() {
        assert_eq!(encode_ibm_single(0.25).unwrap(), [0x40, 0x40, 0x00, 0x00]);
        assert_eq!(encode_ibm_single(0.5).unwrap(), [0x40, 0x80, 0x00, 0x00]);
        assert_eq!(encode_ibm_single(100.0).unwrap(), [0x42, 0x64, 0x00, 0x00]);
        assert_eq!(encode_ibm_single(-118.625).unwrap(), [0xC2, 0x76, 0xA0, 0x00]);
        assert_eq!(encode_ibm_single(16.0).unwrap(), [0x42, 0x10, 0x00, 0x00]);
        assert_eq!(encode_ibm_single(1.0 / 16.0).unwrap(), [0x40, 0x10, 0x00, 0x00]);
    }

    #[test]
    fn test_encode_zero() {
        assert_eq!(encode_ibm_single(0.0).unwrap(), [0u8; 4]);
        assert_eq!(encode_ibm_single(-0.0).unwrap(), [0u8; 4]);
        assert_eq!(encode_ibm_double(0.0).unwrap(), [0u8; 8]);
    }

    #[test]
    fn test_encode_rounds_to_nearest() {
        // 0.1 has an infinite hex expansion 0.1999..., rounded up in the last digit.
        assert_eq!(encode_ibm_single(0.1).unwrap(), [0x40, 0x19, 0x99, 0x9A]);
        assert_eq!(
            encode_ibm_double(0.1).unwrap(),
            [0x40, 0x19, 0x99, 0x99, 0x99, 0x99, 0x99, 0x9A]
        );
    }

    #[test]
    fn test_encode_rounding_carry_renormalizes() {
        // Just below 16: fraction rounds up to 1.0 and moves to the next exponent.
        let value = 16.0 - 2f64.powi(-30);
        assert_eq!(encode_ibm_single(value).unwrap(), [0x42, 0x10, 0x00, 0x00]);
    }

    #[test]
    fn test_encode_max_values() {
        let max = FormatTag::IbmSingle.max_magnitude();
        assert_eq!(encode_ibm_single(max).unwrap(), [0x7F, 0xFF, 0xFF, 0xFF]);
        assert_eq!(
            encode_ibm_double(FormatTag::IbmDouble.max_magnitude()).unwrap(),
            [0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]
        );
    }

    #[test]
    fn test_encode_rejects_out_of_range() {
        assert!(encode_ibm_single(1e76).is_err());
        assert!(encode_ibm_double(-1e300).is_err());
        assert!(encode_ibm_single(f64::NAN).is_err());
        assert!(encode_ibm_double(f64::INFINITY).is_err());
        let err = encode_ibm_single(f64::NEG_INFINITY).unwrap_err();
        assert!(matches!(err, EncodingError::NotRepresentable { ref format, .. } if format == "ibm32"));
    }

    #[test]
    fn test_encode_underflow() {
        // Below the normalized range: stored at exponent 0 with leading zero digits.
        let fields = encode_ibm(IBM_MIN_NORMAL / 16.0, Width::Single).unwrap();
        assert_eq!(fields.exponent(), 0);
        assert_eq!(fields.mantissa(), 0x01_0000);
        assert_eq!(decode_ibm(&fields), IBM_MIN_NORMAL / 16.0);

        // Far below: nothing survives.
        assert_eq!(encode_ibm_single(1e-200).unwrap(), [0u8; 4]);
        assert_eq!(encode_ibm_double(-5e-324).unwrap(), [0u8; 8]);
    }

    #[test]
    fn test_single_roundtrip_within_hex_precision() {
        // Short HFP keeps at least 21 significant bits.
        let values = [
            1.0f32, -1.0, 0.5, 3.14159, -2.71828, 100.0, 256.0, 0.001, 1e-30, 1e30, 7.6543,
            f32::MAX, f32::MIN_POSITIVE,
        ];
        for &v in &values {
            let v = v as f64;
            let decoded = decode_ibm_single(&encode_ibm_single(v).unwrap());
            assert!(
                (decoded - v).abs() <= v.abs() * 2f64.powi(-21),
                "roundtrip failed for {}: got {}",
                v,
                decoded
            );
        }
    }

    #[test]
    fn test_long_roundtrip_is_exact() {
        let values = [
            std::f64::consts::PI,
            -std::f64::consts::E,
            1e10,
            1e-10,
            1e75,
            f32::MAX as f64,
            0.1,
            -123456.789,
        ];
        for &v in &values {
            assert_eq!(decode_ibm_double(&encode_ibm_double(v).unwrap()), v);
        }
    }

    #[test]
    fn test_short_from_f32_survives_long_roundtrip() {
        for v in [3.14159f32, -1000.0, 7.6543, 1e-20] {
            let decoded = decode_ibm_double(&encode_ibm_double(v as f64).unwrap());
            assert_eq!(decoded as f32, v);
        }
    }

    #[test]
    fn test_scale_rounded_ties_to_even() {
        assert_eq!(scale_rounded(0b1010, -2), 0b10); // 2.5 -> 2
        assert_eq!(scale_rounded(0b1110, -2), 0b100); // 3.5 -> 4
        assert_eq!(scale_rounded(0b1011, -2), 0b11); // 2.75 -> 3
        assert_eq!(scale_rounded(3, 4), 48);
        assert_eq!(scale_rounded(u64::MAX, -200), 0);
    }
}
