//! CLI error types.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Errors raised by the hexfloat command line before or around conversion.
#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    /// Input file does not exist.
    #[error("input file not found: {}", path.display())]
    #[diagnostic(
        code(hexfloat::cli::input_not_found),
        help("check the path; records are read from a flat binary file")
    )]
    InputNotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// Output file exists and overwriting is disabled.
    #[error("output file already exists: {}", path.display())]
    #[diagnostic(
        code(hexfloat::cli::output_exists),
        help("remove the file, pass a different --output, or set output.overwrite = true")
    )]
    OutputExists {
        /// The existing path.
        path: PathBuf,
    },

    /// I/O error reading or writing a configuration file.
    #[error("I/O error for {}: {message}", path.display())]
    #[diagnostic(code(hexfloat::cli::config_io))]
    ConfigIo {
        /// Configuration file path.
        path: PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// Parse error in a configuration file.
    #[error("parse error in {}: {message}", path.display())]
    #[diagnostic(
        code(hexfloat::cli::config_parse),
        help("run `hexfloat config` to see a valid configuration")
    )]
    ConfigParse {
        /// Configuration file path.
        path: PathBuf,
        /// Parser message.
        message: String,
    },

    /// Configuration could not be serialized.
    #[error("serialization error: {message}")]
    #[diagnostic(code(hexfloat::cli::config_serialize))]
    ConfigSerialize {
        /// Serializer message.
        message: String,
    },
}
