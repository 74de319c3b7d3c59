//! Environment configuration.
//!
//! All settings come from environment variables (a `.env` file is
//! honored by the entry point): the two service URLs, the identity
//! client id, the session timeout, and optional sign-in credentials
//! for non-interactive use.

use std::env;

use thiserror::Error;
use url::Url;

/// Default inactivity window before the session check: one hour.
const DEFAULT_SESSION_TIMEOUT_SECS: u64 = 60 * 60;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    /// A variable is set but cannot be parsed.
    #[error("invalid value for {name}: {message}")]
    Invalid {
        /// Variable name.
        name: &'static str,
        /// Parse failure description.
        message: String,
    },
}

/// Runtime configuration for the CLI.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the resume-analysis backend.
    pub api_url: Url,
    /// Base URL of the identity service.
    pub identity_url: Url,
    /// Client id presented to the identity service.
    pub identity_client_id: String,
    /// Inactivity window for the session monitor, in seconds.
    pub session_timeout_secs: u64,
    /// Email for non-interactive sign-in.
    pub email: Option<String>,
    /// Password for non-interactive sign-in.
    pub password: Option<String>,
}

impl AppConfig {
    /// Reads the configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when a required variable is missing or
    /// unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            api_url: required_url("VITAE_API_URL")?,
            identity_url: required_url("VITAE_IDENTITY_URL")?,
            identity_client_id: required("VITAE_IDENTITY_CLIENT_ID")?,
            session_timeout_secs: optional_u64(
                "VITAE_SESSION_TIMEOUT_SECS",
                DEFAULT_SESSION_TIMEOUT_SECS,
            )?,
            email: optional("VITAE_EMAIL"),
            password: optional("VITAE_PASSWORD"),
        })
    }
}

fn optional(name: &'static str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.is_empty())
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    optional(name).ok_or(ConfigError::Missing(name))
}

fn required_url(name: &'static str) -> Result<Url, ConfigError> {
    let raw = required(name)?;
    Url::parse(&raw).map_err(|e| ConfigError::Invalid {
        name,
        message: e.to_string(),
    })
}

fn optional_u64(name: &'static str, default: u64) -> Result<u64, ConfigError> {
    match optional(name) {
        None => Ok(default),
        Some(raw) => raw.parse().map_err(|e: std::num::ParseIntError| {
            ConfigError::Invalid {
                name,
                message: e.to_string(),
            }
        }),
    }
}
