//! Config command - print or write the default configuration.

use std::path::Path;

use miette::Result;

use crate::config::Config;

/// Run the config command.
pub fn run(output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            Config::default().write_to_file(path)?;
            tracing::info!("Wrote default configuration to {}", path.display());
        }
        None => print!("{}", Config::generate_default()),
    }
    Ok(())
}
