//! Zero-clamp overflow policy.
//!
//! A value whose magnitude exceeds the largest value of the target format
//! is replaced with exactly `+0.0`. It is not saturated to the maximum and
//! it is not an error. This keeps output byte-compatible with data sets
//! converted by earlier tooling, but it silently drops both sign and
//! magnitude, so it is better read as a compatibility quirk than as a
//! sentinel. Callers that care count `Clamped::clamped`.

use crate::format::FormatTag;

/// A value checked against a target format's range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Clamped {
    /// The value to encode.
    pub value: f64,
    /// Whether the input value was out of range and replaced with zero.
    pub clamped: bool,
}

/// Apply the zero-clamp policy for `target`.
///
/// Infinities are out of range for every format. NaN compares false against
/// every bound and passes through unchanged.
pub fn clamp_and_convert(value: f64, target: FormatTag) -> Clamped {
    if value.abs() > target.max_magnitude() {
        Clamped {
            value: 0.0,
            clamped: true,
        }
    } else {
        Clamped {
            value,
            clamped: false,
        }
    }
}
