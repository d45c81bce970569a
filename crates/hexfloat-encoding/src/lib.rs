//! IBM hexadecimal floating point and IEEE 754 record conversion.
//!
//! This crate converts flat streams of fixed-width binary floating point
//! records between four formats:
//!
//! - **IBM HFP short / long**: base-16, excess-64 exponent, no hidden bit
//!   (4 and 8 bytes)
//! - **IEEE 754 single / double**: binary32 and binary64 (4 and 8 bytes)
//!
//! All records are big-endian. Conversions are stateless per record and
//! preserve record order.
//!
//! # Overflow
//!
//! A value too large for the target format is written as `+0.0` rather
//! than saturated or rejected. This zero-clamp is kept for compatibility
//! with existing converted data; [`ConversionStats::clamped`] counts it.
//!
//! # Example
//!
//! ```rust
//! use hexfloat_encoding::{BatchDriver, FormatTag};
//!
//! // Two short HFP records: 0.25 and 1.0
//! let input = [0x40, 0x40, 0x00, 0x00, 0x41, 0x10, 0x00, 0x00];
//!
//! let driver = BatchDriver::new(FormatTag::IbmSingle, FormatTag::IeeeSingle);
//! let output = driver.convert_bytes(&input).unwrap();
//!
//! assert_eq!(output.stats.records, 2);
//! assert_eq!(&output.bytes[..4], &0.25f32.to_be_bytes());
//! assert_eq!(&output.bytes[4..], &1.0f32.to_be_bytes());
//! ```

pub mod batch;
pub mod convert;
pub mod error;
pub mod float;
pub mod format;

// Re-export commonly used types at crate root
pub use batch::{BatchDriver, BatchOutput, ConversionStats};
pub use convert::{decode_record, encode, Converted, Converter, Narrowing};
pub use error::EncodingError;
pub use float::{
    clamp_and_convert, decode_ibm, decode_ibm_double, decode_ibm_single, decode_ieee_double,
    decode_ieee_single, encode_ibm, encode_ibm_double, encode_ibm_single, encode_ieee_double,
    encode_ieee_single, extract, BitFields, Clamped, Record, Sign,
};
pub use format::{FormatTag, Width, MAX_DOUBLE, MAX_SINGLE};

/// Result type for conversion operations.
pub type Result<T> = std::result::Result<T, EncodingError>;
