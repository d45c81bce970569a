//! IEEE 754 binary floating point records.
//!
//! Single precision is 4 bytes (f32), double precision 8 bytes (f64).
//! Records are always **big-endian**, matching the byte order of HFP
//! records, for both reading and writing.
//!
//! NaN and Infinity are valid IEEE values and pass through unchanged.
//! Range checks belong to the clamp policy, not to these codecs.

/// Encode a value as IEEE single precision, rounding to nearest.
pub fn encode_ieee_single(value: f64) -> [u8; 4] {
    (value as f32).to_be_bytes()
}

/// Decode IEEE single precision to f64. Widening is exact.
pub fn decode_ieee_single(bytes: &[u8; 4]) -> f64 {
    f32::from_be_bytes(*bytes) as f64
}

/// Encode a value as IEEE double precision.
pub fn encode_ieee_double(value: f64) -> [u8; 8] {
    value.to_be_bytes()
}

/// Decode IEEE double precision.
pub fn decode_ieee_double(bytes: &[u8; 8]) -> f64 {
    f64::from_be_bytes(*bytes)
}
