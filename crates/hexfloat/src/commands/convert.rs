//! Convert command - rewrite a record file in another format.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use hexfloat_encoding::{BatchDriver, ConversionStats, FormatTag, Narrowing};
use miette::{IntoDiagnostic, Result, WrapErr};
use tempfile::NamedTempFile;

use super::require_input;
use crate::config::{Buffering, Config};
use crate::error::CliError;

/// Options for one convert run, after merging flags over configuration.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub source: FormatTag,
    pub target: FormatTag,
    pub narrowing: Narrowing,
    pub buffering: Buffering,
    pub overwrite: bool,
}

impl ConvertOptions {
    /// Resolve command-line flags against the loaded configuration.
    pub fn resolve(
        config: &Config,
        input: PathBuf,
        output: Option<PathBuf>,
        source: Option<FormatTag>,
        target: Option<FormatTag>,
        narrowing: Option<Narrowing>,
        stream: bool,
    ) -> Self {
        let target = target.unwrap_or(config.convert.target);
        let output = derive_output_path(&input, output.as_deref(), target, &config.output.extension);
        Self {
            input,
            output,
            source: source.unwrap_or(config.convert.source),
            target,
            narrowing: narrowing.unwrap_or(config.convert.narrowing),
            buffering: if stream {
                Buffering::Stream
            } else {
                config.convert.buffering
            },
            overwrite: config.output.overwrite,
        }
    }
}

/// Work out where converted records are written.
///
/// An explicit output with an extension is used as-is; one without gets
/// `extension` appended. With no explicit output, the result goes next to
/// the input as `<stem>.<target><extension>`.
pub fn derive_output_path(
    input: &Path,
    output: Option<&Path>,
    target: FormatTag,
    extension: &str,
) -> PathBuf {
    match output {
        Some(path) if path.extension().is_some() => path.to_path_buf(),
        Some(path) => {
            let mut name = path.as_os_str().to_owned();
            name.push(extension);
            PathBuf::from(name)
        }
        None => {
            let stem = input
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "output".to_string());
            input.with_file_name(format!("{}.{}{}", stem, target, extension))
        }
    }
}

/// Run the convert command.
pub fn run(options: ConvertOptions) -> Result<()> {
    require_input(&options.input)?;
    if !options.overwrite && options.output.exists() {
        return Err(CliError::OutputExists {
            path: options.output.clone(),
        }
        .into());
    }

    tracing::info!(
        "Converting {} ({}) -> {} ({})",
        options.input.display(),
        options.source,
        options.output.display(),
        options.target
    );

    let driver =
        BatchDriver::new(options.source, options.target).with_narrowing(options.narrowing);
    let stats = match options.buffering {
        Buffering::Memory => convert_in_memory(&driver, &options)?,
        Buffering::Stream => convert_streaming(&driver, &options)?,
    };

    if stats.dropped_bytes > 0 {
        tracing::info!(
            "Ignored {} trailing byte(s) shorter than one {} record",
            stats.dropped_bytes,
            options.source
        );
    }
    println!(
        "Converted {} record(s) to {}{}",
        stats.records,
        options.output.display(),
        if stats.clamped > 0 {
            format!(" ({} out-of-range value(s) written as zero)", stats.clamped)
        } else {
            String::new()
        }
    );
    Ok(())
}

fn convert_in_memory(driver: &BatchDriver, options: &ConvertOptions) -> Result<ConversionStats> {
    let input = std::fs::read(&options.input)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read input file: {}", options.input.display()))?;

    let output = driver.convert_bytes(&input)?;

    std::fs::write(&options.output, &output.bytes)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to write output file: {}", options.output.display()))?;
    Ok(output.stats)
}

fn convert_streaming(driver: &BatchDriver, options: &ConvertOptions) -> Result<ConversionStats> {
    let reader = File::open(&options.input)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to open input file: {}", options.input.display()))?;

    // Records land in a sibling temp file; the output is only replaced on success.
    let dir = match options.output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = NamedTempFile::new_in(dir)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to create temporary file in {}", dir.display()))?;

    let stats =
        driver.convert_stream(BufReader::new(reader), BufWriter::new(staged.as_file_mut()))?;

    let persisted = if options.overwrite {
        staged.persist(&options.output)
    } else {
        staged.persist_noclobber(&options.output)
    };
    persisted
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to write output file: {}", options.output.display()))?;
    Ok(stats)
}
