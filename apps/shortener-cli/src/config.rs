//! Centralized configuration for the shortener CLI.
//!
//! All variables are loaded and validated at startup to fail fast on
//! misconfiguration rather than in the middle of a request.

use std::fmt;

use http_common::has_http_scheme;

/// Log output format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    fn from_str(s: &str) -> Self {
        if s.eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Pretty
        }
    }
}

/// Configuration error.
#[derive(Debug)]
pub struct ConfigError {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Configuration error for {}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

/// Client configuration loaded from environment variables (or CLI overrides).
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL for composing displayed short links (`NGINX_URL`)
    pub base_url: Option<String>,
    /// Origin the `/api/` paths are sent to (`SHORTENER_API_ORIGIN`, default: base URL)
    pub api_origin: Option<String>,
    /// Log format
    pub log_format: LogFormat,
}

impl Config {
    /// Load and validate configuration through `lookup`, which maps a
    /// variable name to its value (normally the process environment, see
    /// `cli::Cli::lookup`).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Base URL for displayed links
        let base_url = http_url(&lookup, "NGINX_URL")?;

        // API origin, falling back to the base URL
        let api_origin = http_url(&lookup, "SHORTENER_API_ORIGIN")?.or_else(|| base_url.clone());

        // Log format
        let log_format = LogFormat::from_str(&lookup("LOG_FORMAT").unwrap_or_else(|| "pretty".into()));

        Ok(Self {
            base_url,
            api_origin,
            log_format,
        })
    }

    /// Base URL, required by commands that compose short links.
    pub fn require_base_url(&self) -> Result<&str, ConfigError> {
        self.base_url.as_deref().ok_or_else(|| ConfigError {
            field: "NGINX_URL",
            message: "Required to compose short links (or pass --base-url)".into(),
        })
    }

    /// API origin, required by commands that talk to the service.
    pub fn require_api_origin(&self) -> Result<&str, ConfigError> {
        self.api_origin.as_deref().ok_or_else(|| ConfigError {
            field: "SHORTENER_API_ORIGIN",
            message: "Required to reach the service (or set NGINX_URL / pass --api-origin)".into(),
        })
    }
}

// Read an optional http(s) URL; empty means unset, one trailing '/' is dropped.
fn http_url<F>(lookup: &F, field: &'static str) -> Result<Option<String>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(field).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    if !has_http_scheme(&raw) {
        return Err(ConfigError {
            field,
            message: format!("'{}' must start with http:// or https://", raw),
        });
    }
    // Links are otherwise `<base>/s/<short>` verbatim; this one trim departs
    // from plain concatenation so a base of `https://x/` never yields `//s/`.
    let trimmed = raw.strip_suffix('/').unwrap_or(&raw).to_string();
    Ok(Some(trimmed))
}
