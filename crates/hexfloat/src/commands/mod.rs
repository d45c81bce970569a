//! CLI command implementations.

pub mod config;
pub mod convert;
pub mod dump;
pub mod generate;

use std::path::Path;

use crate::error::CliError;

/// Fail early when the input file is missing.
pub(crate) fn require_input(path: &Path) -> Result<(), CliError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(CliError::InputNotFound {
            path: path.to_path_buf(),
        })
    }
}
