//! Configuration handling for the service.
//!
//! Everything comes from environment variables with development defaults.
//! The completion-service API key is the only secret; it is optional here so
//! the sample endpoint keeps working without it, and the completion client
//! reports its absence when a call is actually made.

use std::env;
use std::fmt::{Debug, Formatter};
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::telemetry::LogFormat;

/// Environment variable names. Public so tests and the binaries can refer to them.
pub const ENV_BIND_ADDR: &str = "BIND_ADDR";
pub const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_OPENAI_BASE_URL: &str = "OPENAI_BASE_URL";
pub const ENV_OPENAI_MODEL: &str = "OPENAI_MODEL";
pub const ENV_OPENAI_JSON_MODE: &str = "OPENAI_JSON_MODE";
pub const ENV_COMPLETION_TIMEOUT_SECS: &str = "COMPLETION_TIMEOUT_SECS";
pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";

/// Default development values used when environment variables are absent.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1/";
const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
const DEFAULT_COMPLETION_TIMEOUT_SECS: u64 = 60;

/// Application runtime configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    bind_addr: String,
    openai_api_key: Option<String>,
    openai_base_url: String,
    openai_model: String,
    json_mode: bool,
    completion_timeout: Duration,
    log_format: LogFormat,
}

impl Config {
    /// Load from environment variables, falling back to development defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr = env::var(ENV_BIND_ADDR).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let openai_api_key = env::var(ENV_OPENAI_API_KEY)
            .ok()
            .filter(|key| !key.trim().is_empty());
        let openai_base_url =
            env::var(ENV_OPENAI_BASE_URL).unwrap_or_else(|_| DEFAULT_OPENAI_BASE_URL.to_string());
        let openai_model =
            env::var(ENV_OPENAI_MODEL).unwrap_or_else(|_| DEFAULT_OPENAI_MODEL.to_string());

        let json_mode = match env::var(ENV_OPENAI_JSON_MODE) {
            Ok(raw) => parse_bool(ENV_OPENAI_JSON_MODE, &raw)?,
            Err(_) => false,
        };

        let completion_timeout_secs = match env::var(ENV_COMPLETION_TIMEOUT_SECS) {
            Ok(raw) => parse_value::<u64>(ENV_COMPLETION_TIMEOUT_SECS, &raw)?,
            Err(_) => DEFAULT_COMPLETION_TIMEOUT_SECS,
        };
        if completion_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: ENV_COMPLETION_TIMEOUT_SECS,
                reason: "must be greater than zero".to_string(),
            });
        }

        let log_format = match env::var(ENV_LOG_FORMAT) {
            Ok(raw) => parse_value::<LogFormat>(ENV_LOG_FORMAT, &raw)?,
            Err(_) => LogFormat::Text,
        };

        Ok(Self {
            bind_addr,
            openai_api_key,
            openai_base_url,
            openai_model,
            json_mode,
            completion_timeout: Duration::from_secs(completion_timeout_secs),
            log_format,
        })
    }

    /// TCP bind address (host:port) for the HTTP server.
    pub fn bind_addr(&self) -> &str {
        &self.bind_addr
    }
    /// Completion-service API key, if one was supplied.
    pub fn openai_api_key(&self) -> Option<&str> {
        self.openai_api_key.as_deref()
    }
    pub fn openai_base_url(&self) -> &str {
        &self.openai_base_url
    }
    pub fn openai_model(&self) -> &str {
        &self.openai_model
    }
    /// Whether to ask the completion service for a JSON-object response.
    pub fn json_mode(&self) -> bool {
        self.json_mode
    }
    /// Upper bound on a single completion call.
    pub fn completion_timeout(&self) -> Duration {
        self.completion_timeout
    }
    pub fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Replace the API key. Used by tests and embedders that manage secrets themselves.
    pub fn with_openai_api_key(mut self, key: impl Into<String>) -> Self {
        self.openai_api_key = Some(key.into());
        self
    }

    /// Point the completion client at a different base URL.
    pub fn with_openai_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.openai_base_url = base_url.into();
        self
    }

    pub fn with_json_mode(mut self, json_mode: bool) -> Self {
        self.json_mode = json_mode;
        self
    }

    pub fn with_completion_timeout(mut self, timeout: Duration) -> Self {
        self.completion_timeout = timeout;
        self
    }
}

impl Default for Config {
    /// Development defaults (mirrors `from_env` with no env overrides).
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            openai_api_key: None,
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
            json_mode: false,
            completion_timeout: Duration::from_secs(DEFAULT_COMPLETION_TIMEOUT_SECS),
            log_format: LogFormat::Text,
        }
    }
}

// Hand-written so the API key never ends up in logs.
impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("bind_addr", &self.bind_addr)
            .field(
                "openai_api_key",
                &self.openai_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("openai_base_url", &self.openai_base_url)
            .field("openai_model", &self.openai_model)
            .field("json_mode", &self.json_mode)
            .field("completion_timeout", &self.completion_timeout)
            .field("log_format", &self.log_format)
            .finish()
    }
}

/// Errors that can occur while building a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

fn parse_value<T>(field: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidValue {
            field,
            reason: format!("{raw:?}: {e}"),
        })
}

fn parse_bool(field: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(ConfigError::InvalidValue {
            field,
            reason: format!("expected a boolean, got {other:?}"),
        }),
    }
}
