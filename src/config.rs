//! Runtime configuration.
//!
//! Everything is read from the environment once at startup. Unset variables
//! fall back to defaults; set-but-invalid variables are a startup error.

use std::path::PathBuf;
use std::time::Duration;

use crate::NeurodxError;

pub const API_BASE_ENV: &str = "NEURODX_API_BASE";
pub const TIMEOUT_ENV: &str = "NEURODX_TIMEOUT_MS";
pub const SETTLE_ENV: &str = "NEURODX_SETTLE_MS";
pub const LOG_MODE_ENV: &str = "NEURODX_LOG_MODE";
pub const LOG_FILE_ENV: &str = "NEURODX_LOG_FILE";

const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";
const DEFAULT_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_SETTLE_MS: u64 = 800;
const DEFAULT_LOG_FILE: &str = "neurodx.log";

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    /// File when stdout is a terminal, stdout otherwise
    Auto,
    File,
    Stdout,
}

impl LogMode {
    /// Resolve `Auto` against whether stdout is interactive.
    #[must_use]
    pub fn use_file(&self, interactive: bool) -> bool {
        match self {
            Self::Auto => interactive,
            Self::File => true,
            Self::Stdout => false,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Backend origin, without trailing slash
    pub api_base: String,

    /// Bound on every backend request
    pub request_timeout: Duration,

    /// How long the analyzing indicator stays up after a response
    pub settle_delay: Duration,

    pub log_mode: LogMode,

    pub log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            request_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            settle_delay: Duration::from_millis(DEFAULT_SETTLE_MS),
            log_mode: LogMode::Auto,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl Config {
    /// Load configuration from process environment variables.
    ///
    /// # Errors
    /// Returns error if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, NeurodxError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// # Errors
    /// Returns error if a variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, NeurodxError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(API_BASE_ENV) {
            config.api_base = normalize_base_url(&raw)?;
        }

        if let Some(raw) = lookup(TIMEOUT_ENV) {
            let timeout = parse_millis(TIMEOUT_ENV, &raw)?;
            if timeout.is_zero() {
                return Err(NeurodxError::Config(format!(
                    "{TIMEOUT_ENV} must be greater than zero"
                )));
            }
            config.request_timeout = timeout;
        }

        if let Some(raw) = lookup(SETTLE_ENV) {
            config.settle_delay = parse_millis(SETTLE_ENV, &raw)?;
        }

        if let Some(raw) = lookup(LOG_MODE_ENV) {
            config.log_mode = match raw.trim().to_ascii_lowercase().as_str() {
                "auto" | "" => LogMode::Auto,
                "file" => LogMode::File,
                "stdout" => LogMode::Stdout,
                other => {
                    return Err(NeurodxError::Config(format!(
                        "{LOG_MODE_ENV} must be one of auto, file, stdout (got {other:?})"
                    )))
                }
            };
        }

        if let Some(raw) = lookup(LOG_FILE_ENV) {
            if !raw.trim().is_empty() {
                config.log_file = PathBuf::from(raw.trim());
            }
        }

        Ok(config)
    }
}

fn parse_millis(key: &str, raw: &str) -> Result<Duration, NeurodxError> {
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|_| NeurodxError::Config(format!("{key} must be a whole number of milliseconds")))
}

fn normalize_base_url(raw: &str) -> Result<String, NeurodxError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let host = trimmed
        .strip_prefix("http://")
        .or_else(|| trimmed.strip_prefix("https://"))
        .ok_or_else(|| {
            NeurodxError::Config(format!("{API_BASE_ENV} must start with http:// or https://"))
        })?;

    if host.is_empty() {
        return Err(NeurodxError::Config(format!("{API_BASE_ENV} has no host")));
    }

    Ok(trimmed.to_string())
}
