//! # Configuration
//!
//! Operator settings read from an optional TOML file.
//!
//! ## Precedence (highest to lowest)
//!
//! 1. Command-line flags
//! 2. Environment variables (`MUSTER_DATABASE`)
//! 3. Config file (`--config <path>`, else `./muster.toml` when present)
//! 4. Default values
//!
//! HTTP security settings (`MUSTER_API_KEY`, `MUSTER_CORS_ORIGINS`) are read
//! from the environment by the server itself and never from the file.

use muster_core::{ErrorPolicy, MusterError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "muster.toml";

/// Environment variable overriding the database path.
pub const DATABASE_ENV: &str = "MUSTER_DATABASE";

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MusterConfig {
    /// Path to the roster database.
    pub database: PathBuf,
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Assignment run settings.
    pub assignment: AssignmentConfig,
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Assignment run settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssignmentConfig {
    /// What to do after a failed write.
    pub on_error: ErrorPolicy,
}

impl Default for MusterConfig {
    fn default() -> Self {
        Self {
            database: PathBuf::from("muster.db"),
            server: ServerConfig::default(),
            assignment: AssignmentConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl MusterConfig {
    /// Load configuration from the file layer and the environment.
    ///
    /// An explicit path must exist. Without one, `./muster.toml` is used if
    /// present and defaults apply otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self, MusterError> {
        let mut config = match explicit {
            Some(path) => Self::load_from_file(path)?,
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    Self::load_from_file(fallback)?
                } else {
                    Self::default()
                }
            }
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        tracing::debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Result<Self, MusterError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            MusterError::ConfigError(format!("Cannot read '{}': {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, MusterError> {
        toml::from_str(content)
            .map_err(|e| MusterError::ConfigError(format!("Invalid configuration: {}", e)))
    }

    /// Apply environment overrides through `lookup`.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(database) = lookup(DATABASE_ENV).filter(|v| !v.trim().is_empty()) {
            self.database = PathBuf::from(database);
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
