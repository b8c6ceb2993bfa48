//! Configuration loader with TOML parsing
//!
//! This module implements configuration-file loading for the CLI. The file
//! existence check happens before any processing so a missing path can be
//! reported distinctly (exit code 2 at the CLI boundary).

use super::schema::RunConfig;
use crate::domain::errors::JsonymizeError;
use crate::domain::result::Result;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Checks that the file exists
/// 2. Reads the TOML file
/// 3. Parses the TOML into [`RunConfig`]
/// 4. Validates the configuration
/// 5. Resolves extension paths relative to the configuration file's directory
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Errors
///
/// Returns an error if:
/// - The file does not exist or cannot be read
/// - TOML parsing fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use jsonymize::config::loader::load_config;
///
/// let config = load_config("jsonymize.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<RunConfig> {
    let path = path.as_ref();

    // Check if file exists
    if !path.exists() {
        return Err(JsonymizeError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    // Read file contents
    let contents = fs::read_to_string(path).map_err(|e| {
        JsonymizeError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    // Parse TOML
    let mut config: RunConfig = toml::from_str(&contents)
        .map_err(|e| JsonymizeError::Configuration(format!("Failed to parse TOML: {e}")))?;

    // Validate configuration
    config.validate().map_err(|e| {
        JsonymizeError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    // Extension paths named in a config file are relative to that file,
    // not to the process working directory
    if let Some(dir) = path.parent() {
        config.extensions = config
            .extensions
            .into_iter()
            .map(|ext| if ext.is_absolute() { ext } else { dir.join(ext) })
            .collect();
    }

    Ok(config)
}
