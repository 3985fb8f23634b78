//! Service Configuration Module
//!
//! Server and random-source settings loaded from TOML. The parameter table
//! (formulas and optimum ranges) is compiled in and is not configurable.
//!
//! ## Loading Order
//!
//! 1. `CASTING_CONFIG` environment variable (path to TOML file)
//! 2. `casting_config.toml` in the current working directory
//! 3. Built-in defaults
//!
//! `CASTING_SERVER_ADDR` then overrides `server.addr`, and CLI flags override
//! both.
//!
//! ```toml
//! [server]
//! addr = "0.0.0.0:5000"
//! cors_origins = ["http://localhost:5173"]
//! body_limit_bytes = 16384
//!
//! [predictor]
//! seed = 42
//! ```

pub mod defaults;
pub mod validation;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config I/O error ({}): {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config parse error ({}): {}", .0.display(), .1)]
    Parse(PathBuf, #[source] toml::de::Error),

    #[error("Config validation failed:\n  - {}", .0.join("\n  - "))]
    Validation(Vec<String>),
}

// ============================================================================
// Config Types
// ============================================================================

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address, `HOST:PORT`.
    pub addr: String,
    /// Allowed CORS origins. Empty allows any origin.
    pub cors_origins: Vec<String>,
    /// Maximum request body size in bytes.
    pub body_limit_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: defaults::SERVER_ADDR.to_string(),
            cors_origins: Vec::new(),
            body_limit_bytes: defaults::BODY_LIMIT_BYTES,
        }
    }
}

/// Adjusted-value random source settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictorConfig {
    /// Fixed seed for a shared generator. `None` draws from thread-local entropy.
    pub seed: Option<u64>,
}

/// Top-level service configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub predictor: PredictorConfig,
}

impl AppConfig {
    /// Load following the documented lookup order, falling back to defaults
    /// when a file is missing or unreadable.
    pub fn load() -> Self {
        Self::load_file_or_default().apply_env_overrides()
    }

    /// Apply `CASTING_SERVER_ADDR` on top of file or default values.
    ///
    /// Runs after the file is read, whichever way it was found, and before
    /// CLI overrides.
    #[must_use]
    pub fn apply_env_overrides(mut self) -> Self {
        if let Ok(addr) = std::env::var(defaults::SERVER_ADDR_ENV) {
            info!(addr = %addr, "Server address overridden by {}", defaults::SERVER_ADDR_ENV);
            self.server.addr = addr;
        }
        self
    }

    fn load_file_or_default() -> Self {
        // 1. Check env var
        if let Ok(path) = std::env::var(defaults::CONFIG_PATH_ENV) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), "Loaded config from {}", defaults::CONFIG_PATH_ENV);
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config, falling back");
                    }
                }
            } else {
                warn!(path = %path, "{} points to non-existent file, falling back", defaults::CONFIG_PATH_ENV);
            }
        }

        // 2. Check ./casting_config.toml
        let local = PathBuf::from(defaults::LOCAL_CONFIG_FILE);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!("Loaded config from ./{}", defaults::LOCAL_CONFIG_FILE);
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./{}, using defaults", defaults::LOCAL_CONFIG_FILE);
                }
            }
        }

        // 3. Defaults
        info!("No config file found, using built-in defaults");
        Self::default()
    }

    /// Load and validate a specific TOML file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse(_, inner) => ConfigError::Parse(path.to_path_buf(), inner),
            other => other,
        })
    }

    /// Parse and validate TOML text. Unknown keys are logged, not rejected.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        for w in validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let config: Self =
            toml::from_str(contents).map_err(|e| ConfigError::Parse(PathBuf::new(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the server cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let errors = validation::validate_values(self);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Apply CLI overrides on top of the loaded values.
    #[must_use]
    pub fn with_overrides(mut self, addr: Option<String>, seed: Option<u64>) -> Self {
        if let Some(addr) = addr {
            self.server.addr = addr;
        }
        if seed.is_some() {
            self.predictor.seed = seed;
        }
        self
    }
}
