//! Batch conversion of flat record streams.
//!
//! A stream is a plain concatenation of fixed-width records with no header
//! and no separators. Records are converted one at a time and in order, so
//! output record *i* always corresponds to input record *i*.
//!
//! A trailing chunk shorter than one record is dropped without error. It
//! is counted in [`ConversionStats::dropped_bytes`] and logged at debug
//! level.
//!
//! Two drivers are provided:
//!
//! - [`BatchDriver::convert_bytes`] converts an in-memory buffer and returns
//!   the whole output for a single bulk write.
//! - [`BatchDriver::convert_stream`] reads and writes one record at a time
//!   with constant memory.

use std::io::{self, Read, Write};

use tracing::{debug, warn};

use crate::convert::{Converted, Converter, Narrowing};
use crate::format::FormatTag;
use crate::Result;

/// Counters collected during a batch conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionStats {
    /// Records converted.
    pub records: usize,
    /// Records whose value was out of range and written as zero.
    pub clamped: usize,
    /// Bytes of a short trailing chunk that were not converted.
    pub dropped_bytes: usize,
}

impl ConversionStats {
    fn record(&mut self, index: usize, converted: &Converted) {
        self.records += 1;
        if converted.clamped {
            self.clamped += 1;
            debug!(record = index, "value out of range for target, written as zero");
        }
    }

    fn drop_trailing(&mut self, len: usize) {
        if len > 0 {
            self.dropped_bytes = len;
            debug!(bytes = len, "dropping short trailing chunk");
        }
    }

    fn report(&self, target: FormatTag) {
        if self.clamped > 0 {
            warn!(
                clamped = self.clamped,
                records = self.records,
                target = %target,
                "out-of-range values were zero-clamped"
            );
        }
    }
}

/// Output of an in-memory batch conversion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchOutput {
    /// Concatenated output records.
    pub bytes: Vec<u8>,
    /// Counters for the run.
    pub stats: ConversionStats,
}

/// Converts whole streams from one format to another.
#[derive(Debug, Clone, Copy)]
pub struct BatchDriver {
    converter: Converter,
    source: FormatTag,
    target: FormatTag,
}

impl BatchDriver {
    pub fn new(source: FormatTag, target: FormatTag) -> Self {
        Self {
            converter: Converter::default(),
            source,
            target,
        }
    }

    /// Use the given narrowing mode for long HFP to 32-bit conversions.
    pub fn with_narrowing(mut self, narrowing: Narrowing) -> Self {
        self.converter = Converter::new(narrowing);
        self
    }

    pub fn source(&self) -> FormatTag {
        self.source
    }

    pub fn target(&self) -> FormatTag {
        self.target
    }

    /// Convert an in-memory buffer of source records.
    pub fn convert_bytes(&self, input: &[u8]) -> Result<BatchOutput> {
        let record_len = self.source.record_len();
        let chunks = input.chunks_exact(record_len);
        let remainder = chunks.remainder().len();

        let mut output = BatchOutput {
            bytes: Vec::with_capacity(input.len() / record_len * self.target.record_len()),
            stats: ConversionStats::default(),
        };
        for (index, chunk) in chunks.enumerate() {
            let converted = self.convert_one(index, chunk)?;
            output.bytes.extend_from_slice(converted.record.as_bytes());
            output.stats.record(index, &converted);
        }
        output.stats.drop_trailing(remainder);
        output.stats.report(self.target);
        Ok(output)
    }

    /// Convert records from `reader` to `writer` one at a time.
    ///
    /// The writer is flushed before returning.
    pub fn convert_stream<R: Read, W: Write>(
        &self,
        mut reader: R,
        mut writer: W,
    ) -> Result<ConversionStats> {
        let mut stats = ConversionStats::default();
        let mut buffer = vec![0u8; self.source.record_len()];
        let mut index = 0;

        loop {
            let filled = read_record(&mut reader, &mut buffer)?;
            if filled < buffer.len() {
                stats.drop_trailing(filled);
                break;
            }
            let converted = self.convert_one(index, &buffer)?;
            writer.write_all(converted.record.as_bytes())?;
            stats.record(index, &converted);
            index += 1;
        }

        writer.flush()?;
        stats.report(self.target);
        Ok(stats)
    }

    /// Decode every complete record to the value it would hold in the target
    /// format.
    pub fn decode_values(&self, input: &[u8]) -> Result<Vec<f64>> {
        let chunks = input.chunks_exact(self.source.record_len());
        let remainder = chunks.remainder().len();
        if remainder > 0 {
            debug!(bytes = remainder, "dropping short trailing chunk");
        }
        chunks
            .enumerate()
            .map(|(index, chunk)| self.convert_one(index, chunk).map(|c| c.value))
            .collect()
    }

    fn convert_one(&self, index: usize, chunk: &[u8]) -> Result<Converted> {
        self.converter
            .convert_record(chunk, self.source, self.target)
            .inspect_err(|err| warn!(record = index, error = %err, "record conversion failed"))
    }
}

/// Fill `buf` from `reader`, stopping early only at end of stream.
fn read_record<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
