//! Configuration file loading.

use std::fs;
use std::io;
use std::path::Path;

use crate::domain::{AppConfig, AppError};

/// Config file looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "brillianse.toml";

/// Load and validate the configuration.
///
/// An explicit `path` must exist. Without one, `brillianse.toml` in the
/// working directory is used when present and defaults apply otherwise.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, AppError> {
    let (path, explicit) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => (std::env::current_dir()?.join(DEFAULT_CONFIG_FILE), false),
    };

    match fs::read_to_string(&path) {
        Ok(content) => parse_config_content(&content),
        Err(err) if err.kind() == io::ErrorKind::NotFound && !explicit => {
            let config = AppConfig::default();
            config.validate()?;
            Ok(config)
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            Err(AppError::config_error(format!("Config file not found: {}", path.display())))
        }
        Err(err) => Err(err.into()),
    }
}

/// Parse configuration from string content.
pub fn parse_config_content(content: &str) -> Result<AppConfig, AppError> {
    let config: AppConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}
