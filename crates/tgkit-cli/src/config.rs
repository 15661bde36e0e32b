//! CLI configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/tgkit/config.toml` by default. Every section is optional;
//! command-line flags take precedence over the file.
//!
//! ```toml
//! [dates]
//! output_format = "%Y-%m-%d %H:%M:%S"
//!
//! [bytes]
//! precision = 2
//!
//! [files]
//! byte_limit = 230
//!
//! [titles]
//! collapse_underscores = true
//!
//! [progress]
//! width = 10
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use tgkit_core::{
    DEFAULT_FILENAME_LIMIT, DEFAULT_OUTPUT_FORMAT, DEFAULT_PRECISION, DEFAULT_PROGRESS_WIDTH,
    DateTimeNormalizer,
};

use crate::error::{CliError, CliResult};

/// Configuration for the tgkit CLI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Date/time normalization settings.
    pub dates: DateSettings,

    /// Byte size settings.
    pub bytes: ByteSettings,

    /// Filename settings.
    pub files: FileSettings,

    /// Title settings.
    pub titles: TitleSettings,

    /// Progress bar settings.
    pub progress: ProgressSettings,
}

/// Date/time normalization settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateSettings {
    /// chrono format string every date/time token is rewritten into.
    pub output_format: String,
}

impl Default for DateSettings {
    fn default() -> Self {
        Self {
            output_format: DEFAULT_OUTPUT_FORMAT.to_string(),
        }
    }
}

/// Byte size settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ByteSettings {
    /// Decimals kept when formatting sizes.
    pub precision: u32,
}

impl Default for ByteSettings {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
        }
    }
}

/// Filename settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSettings {
    /// Maximum UTF-8 byte length of a file name.
    pub byte_limit: usize,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            byte_limit: DEFAULT_FILENAME_LIMIT,
        }
    }
}

/// Title settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TitleSettings {
    /// Collapse runs of underscores after sanitizing.
    pub collapse_underscores: bool,
}

/// Progress bar settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressSettings {
    /// Number of glyphs in a bar.
    pub width: usize,
}

impl Default for ProgressSettings {
    fn default() -> Self {
        Self {
            width: DEFAULT_PROGRESS_WIDTH,
        }
    }
}

impl Config {
    /// Loads configuration from the default path.
    ///
    /// A missing file yields the defaults.
    pub fn load() -> CliResult<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| {
            CliError::Config(format!("failed to parse {}: {}", path.display(), e))
        })?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Checks that every setting is usable.
    pub fn validate(&self) -> CliResult<()> {
        DateTimeNormalizer::new(self.dates.output_format.as_str())?;
        if self.files.byte_limit == 0 {
            return Err(CliError::Config("files.byte_limit must be greater than 0".into()));
        }
        if self.progress.width == 0 {
            return Err(CliError::Config("progress.width must be greater than 0".into()));
        }
        Ok(())
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tgkit")
    }
}
