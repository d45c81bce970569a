//! Configuration system for hexfloat.
//!
//! Supports loading configuration from:
//! - `~/.config/hexfloat/config.toml` for user defaults
//! - `hexfloat.toml` in current directory
//! - Environment variables (HEXFLOAT_*)
//! - Command-line arguments (highest priority)

use std::path::{Path, PathBuf};

use hexfloat_encoding::{FormatTag, Narrowing};
use serde::{Deserialize, Serialize};

use crate::error::CliError;

/// Complete configuration for hexfloat.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Conversion settings.
    pub convert: ConvertConfig,
    /// Output file settings.
    pub output: OutputConfig,
}

/// How records move between input and output files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Buffering {
    /// Read the whole input, convert, then write the output in one go.
    #[default]
    Memory,
    /// Convert record by record with constant memory.
    Stream,
}

impl std::str::FromStr for Buffering {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Buffering::Memory),
            "stream" => Ok(Buffering::Stream),
            other => Err(format!("unknown buffering mode '{}'", other)),
        }
    }
}

/// Conversion configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// Default source format.
    pub source: FormatTag,
    /// Default target format.
    pub target: FormatTag,
    /// Narrowing mode for long HFP to 32-bit targets.
    pub narrowing: Narrowing,
    /// Buffering mode.
    pub buffering: Buffering,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            source: FormatTag::IbmSingle,
            target: FormatTag::IeeeSingle,
            narrowing: Narrowing::Round,
            buffering: Buffering::Memory,
        }
    }
}

/// Output file configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Extension appended to output names given without one.
    pub extension: String,
    /// Replace existing output files.
    pub overwrite: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            extension: ".bin".to_string(),
            overwrite: true,
        }
    }
}

/// One configuration file as written. Fields left out of the file stay
/// `None` and do not override earlier layers.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConfigLayer {
    pub convert: ConvertLayer,
    pub output: OutputLayer,
}

/// `[convert]` section of a configuration file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConvertLayer {
    pub source: Option<FormatTag>,
    pub target: Option<FormatTag>,
    pub narrowing: Option<Narrowing>,
    pub buffering: Option<Buffering>,
}

/// `[output]` section of a configuration file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct OutputLayer {
    pub extension: Option<String>,
    pub overwrite: Option<bool>,
}

impl ConfigLayer {
    /// Parse a layer from TOML text.
    pub fn parse(path: &Path, content: &str) -> Result<Self, CliError> {
        toml::from_str(content).map_err(|e| CliError::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Read and parse a layer from a file.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let content = std::fs::read_to_string(path).map_err(|e| CliError::ConfigIo {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::parse(path, &content)
    }
}

impl Config {
    /// Load configuration from default locations.
    pub fn load() -> Self {
        let mut config = Config::default();

        // Try user config first
        if let Some(user_config) = Self::user_config_path() {
            if user_config.exists() {
                match ConfigLayer::load(&user_config) {
                    Ok(layer) => config = config.merge(layer),
                    Err(e) => tracing::warn!("Ignoring user config: {}", e),
                }
            }
        }

        // Then project config (higher priority)
        let project = Path::new("hexfloat.toml");
        if project.exists() {
            match ConfigLayer::load(project) {
                Ok(layer) => config = config.merge(layer),
                Err(e) => tracing::warn!("Ignoring project config: {}", e),
            }
        }

        // Then environment variables (highest priority)
        config.apply_env(|key| std::env::var(key).ok());

        config
    }

    /// Load a single configuration file over the defaults.
    pub fn load_from_file(path: &Path) -> Result<Self, CliError> {
        ConfigLayer::load(path).map(|layer| Config::default().merge(layer))
    }

    /// Get the user configuration file path.
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("hexfloat").join("config.toml"))
    }

    /// Apply the fields a layer sets; everything else is kept.
    pub fn merge(mut self, layer: ConfigLayer) -> Self {
        let ConfigLayer { convert, output } = layer;

        if let Some(source) = convert.source {
            self.convert.source = source;
        }
        if let Some(target) = convert.target {
            self.convert.target = target;
        }
        if let Some(narrowing) = convert.narrowing {
            self.convert.narrowing = narrowing;
        }
        if let Some(buffering) = convert.buffering {
            self.convert.buffering = buffering;
        }

        if let Some(extension) = output.extension {
            self.output.extension = extension;
        }
        if let Some(overwrite) = output.overwrite {
            self.output.overwrite = overwrite;
        }

        self
    }

    /// Apply HEXFLOAT_* variables. Unparseable values are logged and skipped.
    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("HEXFLOAT_SOURCE") {
            match val.parse() {
                Ok(format) => self.convert.source = format,
                Err(e) => tracing::warn!("Ignoring HEXFLOAT_SOURCE: {}", e),
            }
        }
        if let Some(val) = var("HEXFLOAT_TARGET") {
            match val.parse() {
                Ok(format) => self.convert.target = format,
                Err(e) => tracing::warn!("Ignoring HEXFLOAT_TARGET: {}", e),
            }
        }
        if let Some(val) = var("HEXFLOAT_NARROWING") {
            match val.parse() {
                Ok(mode) => self.convert.narrowing = mode,
                Err(e) => tracing::warn!("Ignoring HEXFLOAT_NARROWING: {}", e),
            }
        }
        if let Some(val) = var("HEXFLOAT_BUFFERING") {
            match val.parse() {
                Ok(mode) => self.convert.buffering = mode,
                Err(e) => tracing::warn!("Ignoring HEXFLOAT_BUFFERING: {}", e),
            }
        }
        if let Some(val) = var("HEXFLOAT_EXTENSION") {
            self.output.extension = val;
        }
        if let Some(val) = var("HEXFLOAT_OVERWRITE") {
            match val.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => self.output.overwrite = true,
                "0" | "false" | "no" => self.output.overwrite = false,
                other => {
                    tracing::warn!("Ignoring HEXFLOAT_OVERWRITE: '{}' is not a boolean", other)
                }
            }
        }
    }

    /// Generate a default configuration file.
    pub fn generate_default() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }

    /// Write configuration to a file.
    pub fn write_to_file(&self, path: &Path) -> Result<(), CliError> {
        let content = toml::to_string_pretty(self).map_err(|e| CliError::ConfigSerialize {
            message: e.to_string(),
        })?;

        std::fs::write(path, content).map_err(|e| CliError::ConfigIo {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}
