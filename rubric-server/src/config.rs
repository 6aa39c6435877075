//! Server configuration
//!
//! Layered, lowest priority first:
//! 1. Built-in defaults
//! 2. TOML file (`--config <path>`, or `~/.rubric/config.toml` when present)
//! 3. Environment: `RUBRIC_BIND`, `DATABASE_URL`, `RUBRIC_MAX_CONNECTIONS`,
//!    `RUBRIC_CORS_ORIGINS` (comma separated)
//! 4. CLI flags (applied by the binary)

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use axum::http::HeaderValue;
use serde::Deserialize;

use crate::db::DEFAULT_MAX_CONNECTIONS;

pub const ENV_BIND: &str = "RUBRIC_BIND";
pub const ENV_DATABASE_URL: &str = "DATABASE_URL";
pub const ENV_MAX_CONNECTIONS: &str = "RUBRIC_MAX_CONNECTIONS";
pub const ENV_CORS_ORIGINS: &str = "RUBRIC_CORS_ORIGINS";

/// Configuration error, reported once at startup
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid value for {var}: {reason}")]
    Env { var: &'static str, reason: String },

    #[error("invalid CORS origin '{origin}'")]
    Origin { origin: String },
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:8000)
    pub bind_addr: SocketAddr,

    /// PostgreSQL connection string
    pub database_url: String,

    /// Pool size
    pub max_connections: u32,

    /// Origins allowed to call the API with credentials
    pub cors_origins: Vec<String>,

    /// Allow any origin (mirrors the request origin, credentials included).
    ///
    /// WARNING: development only.
    pub cors_permissive: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            database_url: "postgres://localhost/rubric".to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            cors_origins: vec![
                "http://localhost".to_string(),
                "http://localhost:4000".to_string(),
            ],
            cors_permissive: false,
        }
    }
}

impl ServerConfig {
    /// Default config file path: ~/.rubric/config.toml
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".rubric").join("config.toml"))
    }

    /// Load defaults, then the config file, then the process environment.
    ///
    /// An explicit `path` must exist; the default path is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path().filter(|p| p.exists()) {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };

        config.apply_env(|var| std::env::var(var).ok())?;
        Ok(config)
    }

    /// Read a TOML config file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// Override fields from environment variables, read through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(bind) = lookup(ENV_BIND) {
            self.bind_addr = bind.parse().map_err(|e| ConfigError::Env {
                var: ENV_BIND,
                reason: format!("{e}"),
            })?;
        }

        if let Some(url) = lookup(ENV_DATABASE_URL) {
            self.database_url = url;
        }

        if let Some(max) = lookup(ENV_MAX_CONNECTIONS) {
            self.max_connections = max.parse().map_err(|e| ConfigError::Env {
                var: ENV_MAX_CONNECTIONS,
                reason: format!("{e}"),
            })?;
        }

        if let Some(origins) = lookup(ENV_CORS_ORIGINS) {
            self.cors_origins = split_origins(&origins);
        }

        Ok(())
    }

    /// Parse the configured origins into header values.
    pub fn cors_origin_values(&self) -> Result<Vec<HeaderValue>, ConfigError> {
        self.cors_origins
            .iter()
            .map(|origin| {
                origin
                    .parse::<HeaderValue>()
                    .ok()
                    .filter(|_| origin.starts_with("http://") || origin.starts_with("https://"))
                    .ok_or_else(|| ConfigError::Origin {
                        origin: origin.clone(),
                    })
            })
            .collect()
    }
}

/// Split a comma separated origin list, dropping blanks and trailing slashes.
pub fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|origin| origin.trim().trim_end_matches('/'))
        .filter(|origin| !origin.is_empty())
        .map(str::to_owned)
        .collect()
}
