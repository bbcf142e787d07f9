//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::{AmbientConfig, RequestConfig};
use crate::config::ConfigError;

/// Load a per-call request configuration from a TOML file.
pub fn load_request_config(path: &Path) -> Result<RequestConfig, ConfigError> {
    parse_toml(path)
}

/// Load ambient defaults from a TOML file.
pub fn load_ambient_config(path: &Path) -> Result<AmbientConfig, ConfigError> {
    parse_toml(path)
}

fn parse_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    toml::from_str(&content).map_err(|e| ConfigError::Parse {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}
