//! Configuration commands.

use std::path::Path;

use crate::config::Config;
use crate::error::{CliError, CliResult};

/// Renders the effective configuration as TOML.
pub fn dump(config: &Config, path: &Path) -> CliResult<String> {
    let toml_str = toml::to_string_pretty(config)
        .map_err(|e| CliError::Config(format!("failed to serialize config: {}", e)))?;
    Ok(format!("# config.toml ({})\n{}", path.display(), toml_str.trim_end()))
}

/// Validates the configuration.
pub fn validate(config: &Config) -> CliResult<String> {
    config.validate()?;
    Ok("Configuration is valid.".to_string())
}

/// Shows the configuration file path.
pub fn path(path: &Path) -> CliResult<String> {
    Ok(format!("config: {}", path.display()))
}
