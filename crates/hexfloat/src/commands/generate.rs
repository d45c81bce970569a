//! Generate command - write the reference HFP data set.
//!
//! The set holds every integer in `-100..=100` followed by the sequence
//! `-1000 + 7.6543 * k` up to (not including) 1000. An optional text file
//! receives the value each record decodes to, one per line, for comparing
//! against `hexfloat dump`.

use std::path::Path;

use hexfloat_encoding::{decode_record, encode, FormatTag};
use miette::{IntoDiagnostic, Result, WrapErr};

use super::dump::format_value;

const STEP: f64 = 7.6543;

/// The reference values, in file order.
pub fn reference_values() -> Vec<f64> {
    let integers = (-100..=100).map(f64::from);
    let steps = (0u32..)
        .map(|k| -1000.0 + STEP * f64::from(k))
        .take_while(|v| *v < 1000.0);
    integers.chain(steps).collect()
}

/// Encode `values` as `format` records, returning the bytes and the
/// expected decoded text.
pub fn build(values: &[f64], format: FormatTag) -> Result<(Vec<u8>, String)> {
    let mut bytes = Vec::with_capacity(values.len() * format.record_len());
    let mut expected = String::new();
    for &value in values {
        let record = encode(value, format)?;
        let decoded = decode_record(record.as_bytes(), format)?;
        bytes.extend_from_slice(record.as_bytes());
        expected.push_str(&format_value(decoded, FormatTag::IeeeDouble));
        expected.push('\n');
    }
    Ok((bytes, expected))
}

/// Run the generate command.
pub fn run(output: &Path, format: FormatTag, expected: Option<&Path>) -> Result<()> {
    if !format.is_ibm() {
        return Err(miette::miette!(
            code = "hexfloat::cli::not_hfp",
            help = "use ibm32 or ibm64",
            "reference data is generated as IBM hexadecimal floats, not {format}"
        ));
    }

    let values = reference_values();
    let (bytes, text) = build(&values, format)?;

    std::fs::write(output, &bytes)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to write output file: {}", output.display()))?;
    tracing::info!("Wrote {} {} record(s) to {}", values.len(), format, output.display());

    if let Some(path) = expected {
        std::fs::write(path, text)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to write expected values: {}", path.display()))?;
        tracing::info!("Wrote expected values to {}", path.display());
    }
    Ok(())
}
