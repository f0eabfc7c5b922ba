//! # Application Configuration
//!
//! This module manages application configuration loaded from environment variables.
//! All configuration is validated on startup to fail fast if misconfigured.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `BIND_ADDRESS` | `127.0.0.1:3001` |
//! | `ALLOWED_ORIGINS` | local dev origins (comma-separated) |
//! | `LOG_LEVEL` | `info` |
//!
//! The config is initialized once at application startup using [`init_config()`]
//! and can then be read anywhere through [`core_config()`].

use crate::error::{AppError, Result};
use axum::http::HeaderValue;
use lib_utils::{get_env_list, get_env_or, get_env_parse, EnvError};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::OnceLock;

pub const DEFAULT_BIND_ADDRESS: SocketAddr =
    SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 3001);
/// Allows every origin when listed in `ALLOWED_ORIGINS`.
pub const ANY_ORIGIN: &str = "*";
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Application configuration loaded from environment variables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Socket address the HTTP server binds to
    pub bind_address: SocketAddr,

    /// Origins allowed by the CORS layer
    pub allowed_origins: Vec<String>,

    /// Tracing filter level
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS,
            allowed_origins: default_origins(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

fn default_origins() -> Vec<String> {
    [
        "http://localhost:3000",
        "http://127.0.0.1:3000",
        "http://localhost:5173",
        "http://127.0.0.1:5173",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let bind_address = match get_env_parse::<SocketAddr>("BIND_ADDRESS") {
            Ok(addr) => addr,
            Err(EnvError::MissingEnv(_)) => DEFAULT_BIND_ADDRESS,
            Err(e) => return Err(e.into()),
        };
        let allowed_origins = get_env_list("ALLOWED_ORIGINS").unwrap_or_else(default_origins);
        let log_level = get_env_or("LOG_LEVEL", DEFAULT_LOG_LEVEL).to_lowercase();

        Ok(Self {
            bind_address,
            allowed_origins,
            log_level,
        })
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        self.cors_origins()?;

        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(AppError::Config(format!(
                "LOG_LEVEL must be one of {}, got '{}'",
                LOG_LEVELS.join(", "),
                self.log_level
            )));
        }

        Ok(())
    }

    /// Parsed CORS origins. `None` means any origin (`*` was listed).
    ///
    /// # Errors
    ///
    /// Fails if the list is empty or an entry is not an `http(s)://` origin.
    pub fn cors_origins(&self) -> Result<Option<Vec<HeaderValue>>> {
        if self.allowed_origins.is_empty() {
            return Err(AppError::Config(
                "ALLOWED_ORIGINS must list at least one origin".to_string(),
            ));
        }

        if self.allowed_origins.iter().any(|o| o == ANY_ORIGIN) {
            return Ok(None);
        }

        self.allowed_origins
            .iter()
            .map(|origin| {
                let is_http = origin.starts_with("http://") || origin.starts_with("https://");
                match origin.parse::<HeaderValue>() {
                    Ok(value) if is_http => Ok(value),
                    _ => Err(AppError::Config(format!(
                        "ALLOWED_ORIGINS entry '{}' is not an http(s) origin",
                        origin
                    ))),
                }
            })
            .collect::<Result<Vec<_>>>()
            .map(Some)
    }
}

/// Global configuration instance (initialized once at startup).
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Load, validate and store the global configuration.
///
/// # Errors
///
/// Returns an error if:
/// - Configuration validation fails
/// - Config has already been initialized
pub fn init_config() -> Result<&'static Config> {
    let config = Config::from_env()?;
    config.validate()?;

    CONFIG
        .set(config)
        .map_err(|_| AppError::Config("Config has already been initialized".to_string()))?;

    core_config()
}

/// Get a reference to the global configuration.
///
/// Fails if [`init_config()`] has not been called yet.
pub fn core_config() -> Result<&'static Config> {
    CONFIG.get().ok_or_else(|| {
        AppError::Config("Config must be initialized with init_config() before use".to_string())
    })
}
