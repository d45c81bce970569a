//! Error types for floating point record conversion.

use miette::Diagnostic;
use thiserror::Error;

/// Errors that can occur while extracting, decoding or encoding records.
#[derive(Debug, Error, Diagnostic)]
pub enum EncodingError {
    /// Record length does not match the width of the declared format.
    #[error("malformed record: expected {expected} bytes, got {actual}")]
    #[diagnostic(
        code(hexfloat::malformed_record),
        help("records are fixed-width: 4 bytes for single precision, 8 for double")
    )]
    MalformedRecord {
        /// Width of the declared format in bytes.
        expected: usize,
        /// Length of the chunk that was supplied.
        actual: usize,
    },

    /// A field value does not fit the bits reserved for it.
    #[error("{field} value {value:#x} exceeds maximum {max:#x}")]
    #[diagnostic(code(hexfloat::invalid_field))]
    InvalidField {
        /// Field name (exponent or mantissa).
        field: &'static str,
        /// The rejected value.
        value: u64,
        /// Largest value the field can hold.
        max: u64,
    },

    /// The value has no representation in the target format.
    #[error("{value} cannot be represented as {format}")]
    #[diagnostic(
        code(hexfloat::not_representable),
        help("IBM hexadecimal floating point has no NaN or Infinity")
    )]
    NotRepresentable {
        /// The offending value.
        value: f64,
        /// Target format name.
        format: String,
    },

    /// Format name outside of the supported set.
    #[error("unsupported format: {name}")]
    #[diagnostic(
        code(hexfloat::unsupported_format),
        help("supported formats are ibm32, ibm64, ieee32 and ieee64")
    )]
    UnsupportedFormat {
        /// The name that failed to parse.
        name: String,
    },

    /// Reading or writing a record stream failed.
    #[error("I/O error: {message}")]
    #[diagnostic(code(hexfloat::io_error))]
    Io {
        /// Description of the I/O error.
        message: String,
    },
}

impl From<std::io::Error> for EncodingError {
    fn from(err: std::io::Error) -> Self {
        EncodingError::Io {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_record_message() {
        let err = EncodingError::MalformedRecord {
            expected: 8,
            actual: 5,
        };
        assert_eq!(
            err.to_string(),
            "malformed record: expected 8 bytes, got 5"
        );
    }

    #[test]
    fn test_invalid_field_message_is_hex() {
        let err = EncodingError::InvalidField {
            field: "exponent",
            value: 0x80,
            max: 0x7F,
        };
        assert_eq!(err.to_string(), "exponent value 0x80 exceeds maximum 0x7f");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "eof");
        let err: EncodingError = io.into();
        assert!(matches!(err, EncodingError::Io { .. }));
    }
}
