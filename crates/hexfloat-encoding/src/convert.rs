//! Record-level conversion between any two formats.
//!
//! A conversion runs in three steps: decode the source record to an f64,
//! apply the zero-clamp policy for the target, and encode the result in
//! the target format. All sixteen source/target pairs are supported.
//!
//! Two pairs change width inside the IBM family:
//!
//! - A short HFP source with a long target is widened by appending 32
//!   zero bits to the record before decoding.
//! - A long HFP source with a short target depends on [`Narrowing`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EncodingError;
use crate::float::{
    clamp_and_convert, decode_ibm, decode_ieee_double, decode_ieee_single, encode_ibm_double,
    encode_ibm_single, encode_ieee_double, encode_ieee_single, extract, Clamped, Record,
};
use crate::format::{FormatTag, Width};
use crate::Result;

/// How a long HFP record is narrowed to a 32-bit target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Narrowing {
    /// Decode all 56 mantissa bits, then round to nearest into the target.
    #[default]
    Round,
    /// Keep the leading 32 bits of the record and decode them as short HFP.
    Truncate,
}

impl fmt::Display for Narrowing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Narrowing::Round => f.write_str("round"),
            Narrowing::Truncate => f.write_str("truncate"),
        }
    }
}

impl FromStr for Narrowing {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "round" => Ok(Narrowing::Round),
            "truncate" => Ok(Narrowing::Truncate),
            _ => Err(EncodingError::UnsupportedFormat {
                name: format!("narrowing mode '{}'", s),
            }),
        }
    }
}

/// Result of converting one record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Converted {
    /// The encoded output record.
    pub record: Record,
    /// The value the output record holds.
    pub value: f64,
    /// Whether the source value was out of range and zero-clamped.
    pub clamped: bool,
}

/// Encode a value in the target format.
///
/// No range policy is applied here; see [`clamp_and_convert`].
///
/// # Errors
/// `NotRepresentable` when an HFP target receives NaN, Infinity or a
/// magnitude beyond the HFP range.
pub fn encode(value: f64, target: FormatTag) -> Result<Record> {
    Ok(match target {
        FormatTag::IbmSingle => Record::Short(encode_ibm_single(value)?),
        FormatTag::IbmDouble => Record::Long(encode_ibm_double(value)?),
        FormatTag::IeeeSingle => Record::Short(encode_ieee_single(value)),
        FormatTag::IeeeDouble => Record::Long(encode_ieee_double(value)),
    })
}

/// Decode one record of any format to its value.
pub fn decode_record(record: &[u8], format: FormatTag) -> Result<f64> {
    match format {
        FormatTag::IbmSingle | FormatTag::IbmDouble => {
            Ok(decode_ibm(&extract(record, format.width())?))
        }
        FormatTag::IeeeSingle => Ok(decode_ieee_single(&fixed(record)?)),
        FormatTag::IeeeDouble => Ok(decode_ieee_double(&fixed(record)?)),
    }
}

fn fixed<const N: usize>(record: &[u8]) -> Result<[u8; N]> {
    record
        .try_into()
        .map_err(|_| EncodingError::MalformedRecord {
            expected: N,
            actual: record.len(),
        })
}

/// Stateless record converter.
#[derive(Debug, Clone, Copy, Default)]
pub struct Converter {
    narrowing: Narrowing,
}

impl Converter {
    pub fn new(narrowing: Narrowing) -> Self {
        Self { narrowing }
    }

    pub fn narrowing(&self) -> Narrowing {
        self.narrowing
    }

    /// Decode a source record to the value that will be offered to `target`,
    /// before range checks.
    pub fn decode_source(&self, record: &[u8], source: FormatTag, target: FormatTag) -> Result<f64> {
        match (source, target.width()) {
            (FormatTag::IbmSingle, Width::Double) => {
                let fields = extract(record, Width::Single)?;
                Ok(decode_ibm(&fields.pad_to_double()))
            }
            (FormatTag::IbmDouble, Width::Single) if self.narrowing == Narrowing::Truncate => {
                let fields = extract(record, Width::Double)?;
                Ok(decode_ibm(&fields.truncate_to_single()))
            }
            _ => decode_record(record, source),
        }
    }

    /// Convert one record from `source` to `target`.
    pub fn convert_record(
        &self,
        record: &[u8],
        source: FormatTag,
        target: FormatTag,
    ) -> Result<Converted> {
        let decoded = self.decode_source(record, source, target)?;
        let Clamped { value, clamped } = clamp_and_convert(decoded, target);
        let record = encode(value, target)?;
        let value = decode_record(record.as_bytes(), target)?;
        Ok(Converted {
            record,
            value,
            clamped,
        })
    }

    /// The value a converted record holds, for printing.
    pub fn decode_value(&self, record: &[u8], source: FormatTag, target: FormatTag) -> Result<f64> {
        self.convert_record(record, source, target)
            .map(|converted| converted.value)
    }
}
