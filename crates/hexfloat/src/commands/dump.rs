//! Dump command - print decoded values, one per line.

use std::io::Write;
use std::path::Path;

use hexfloat_encoding::{BatchDriver, FormatTag, Narrowing, Width};
use miette::{IntoDiagnostic, Result, WrapErr};

use super::require_input;

/// Render one value at the precision of the target format.
///
/// Integral values keep a trailing `.0`, and magnitudes outside
/// `1e-4..1e16` switch to exponent form (`7.2370051459731155e75`).
pub fn format_value(value: f64, target: FormatTag) -> String {
    match target.width() {
        Width::Single => format!("{:?}", value as f32),
        Width::Double => format!("{:?}", value),
    }
}

/// Run the dump command.
pub fn run(input: &Path, format: FormatTag, target: FormatTag, narrowing: Narrowing) -> Result<()> {
    require_input(input)?;

    let data = std::fs::read(input)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read input file: {}", input.display()))?;

    let driver = BatchDriver::new(format, target).with_narrowing(narrowing);
    let values = driver.decode_values(&data)?;
    tracing::debug!("Decoded {} {} record(s) as {}", values.len(), format, target);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for value in values {
        writeln!(out, "{}", format_value(value, target))
            .into_diagnostic()
            .wrap_err("Failed to write to stdout")?;
    }
    Ok(())
}
