//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.
//!
//! The backend URL follows the build: debug builds talk to the development
//! backend, release builds to the production URL captured from
//! `BETTERREADS_BACKEND_URL` at compile time.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Backend used by debug builds unless overridden
pub const DEVELOPMENT_BACKEND_URL: &str = "http://localhost:8080";

/// Backend baked into release builds
pub const PRODUCTION_BACKEND_URL: Option<&str> = option_env!("BETTERREADS_BACKEND_URL");

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Build environment the backend URL is selected for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

impl Default for Environment {
    fn default() -> Self {
        if cfg!(debug_assertions) {
            Environment::Development
        } else {
            Environment::Production
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(ConfigError::InvalidEnvironment(other.to_string())),
        }
    }
}

impl Environment {
    /// Backend URL this environment was built with
    ///
    /// A production build without `BETTERREADS_BACKEND_URL` has no backend.
    pub fn default_backend_url(self) -> Result<String, ConfigError> {
        self.backend_url_with(PRODUCTION_BACKEND_URL)
    }

    fn backend_url_with(self, production: Option<&str>) -> Result<String, ConfigError> {
        match self {
            Environment::Development => Ok(DEVELOPMENT_BACKEND_URL.to_string()),
            Environment::Production => production
                .filter(|url| !url.trim().is_empty())
                .map(str::to_string)
                .ok_or(ConfigError::MissingProductionUrl),
        }
    }
}

/// Backend connection configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BackendConfig {
    #[serde(default)]
    pub environment: Environment,

    /// Explicit base URL, overriding the environment's default
    pub base_url: Option<String>,

    /// Session cookie to seed the transport with (`name=value`)
    pub session_cookie: Option<String>,
}

impl BackendConfig {
    /// Base URL after applying the explicit override
    pub fn resolved_base_url(&self) -> Result<String, ConfigError> {
        match self.base_url.as_deref().filter(|url| !url.trim().is_empty()) {
            Some(url) => Ok(url.to_string()),
            None => self.environment.default_backend_url(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    ///
    /// A config file that exists but cannot be read or parsed is an error
    /// rather than being skipped.
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::load_first(&Self::default_paths())
    }

    /// Load the first existing file in `paths`, or fall back to the environment
    pub fn load_first(paths: &[PathBuf]) -> Result<Self, ConfigError> {
        if let Some(path) = paths.iter().find(|p| p.exists()) {
            let config = Self::load_with_env(path)?;
            tracing::info!("Loaded config from {:?}", path);
            return Ok(config);
        }

        tracing::debug!("Using default config with environment overrides");
        Ok(Self::from_env())
    }

    /// Candidate config files, most specific first
    pub fn default_paths() -> Vec<PathBuf> {
        [
            dirs::config_dir().map(|p| p.join("betterreads").join("config.toml")),
            Some(PathBuf::from("./config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("BETTERREADS_BACKEND_URL") {
            self.backend.base_url = Some(url);
        }
        if let Ok(env) = std::env::var("BETTERREADS_ENVIRONMENT") {
            match env.parse() {
                Ok(env) => self.backend.environment = env,
                Err(e) => tracing::warn!("Ignoring BETTERREADS_ENVIRONMENT: {}", e),
            }
        }
        if let Ok(cookie) = std::env::var("BETTERREADS_SESSION_COOKIE") {
            self.backend.session_cookie = Some(cookie);
        }

        if let Ok(level) = std::env::var("BETTERREADS_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("BETTERREADS_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Unknown environment {0:?} (expected development or production)")]
    InvalidEnvironment(String),

    #[error("No production backend URL: build with BETTERREADS_BACKEND_URL set or configure backend.base_url")]
    MissingProductionUrl,
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# BetterReads Configuration
#
# Environment variables override these settings:
# - BETTERREADS_BACKEND_URL
# - BETTERREADS_ENVIRONMENT
# - BETTERREADS_SESSION_COOKIE
# - BETTERREADS_LOG_LEVEL
# - BETTERREADS_LOG_FORMAT

[backend]
# Which build environment's backend to use: development or production
environment = "development"

# Explicit backend URL (overrides the environment default)
# base_url = "http://localhost:8080"

# Session cookie copied from a signed-in browser, e.g. "token=..."
# session_cookie = ""

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
