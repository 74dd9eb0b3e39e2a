use std::fmt::Display;
use std::str::FromStr;

use axum::http::HeaderValue;

use crate::auth::jwt::JwtConfig;

/// A required variable is missing or a value does not parse.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Log output format selected by `LOG_FORMAT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("expected `text` or `json`, got `{other}`")),
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// Everything except the database URL and the signing secret has a default
/// suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    pub database_url: String,
    /// Upper bound on pooled connections (default: `10`).
    pub db_max_connections: u32,
    /// How long a request may wait for a pooled connection (default: `5`).
    pub db_acquire_timeout_secs: u64,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<HeaderValue>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub log_format: LogFormat,
    /// Token signing secret and lifetime.
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                   | Default                 |
    /// |---------------------------|-------------------------|
    /// | `HOST`                    | `0.0.0.0`               |
    /// | `PORT`                    | `8080`                  |
    /// | `DATABASE_URL`            | required                |
    /// | `DB_MAX_CONNECTIONS`      | `10`                    |
    /// | `DB_ACQUIRE_TIMEOUT_SECS` | `5`                     |
    /// | `CORS_ORIGINS`            | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                    |
    /// | `LOG_FORMAT`              | `text`                  |
    ///
    /// See [`JwtConfig`] for `JWT_SECRET` and `JWT_EXPIRY_HOURS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&|key: &str| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_or(lookup, "PORT", 8080u16)?;
        let database_url = required(lookup, "DATABASE_URL")?;
        let db_max_connections = parse_or(lookup, "DB_MAX_CONNECTIONS", 10u32)?;
        let db_acquire_timeout_secs = parse_or(lookup, "DB_ACQUIRE_TIMEOUT_SECS", 5u64)?;
        let request_timeout_secs = parse_or(lookup, "REQUEST_TIMEOUT_SECS", 30u64)?;
        let log_format = parse_or(lookup, "LOG_FORMAT", LogFormat::Text)?;

        let cors_origins = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".into())
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|origin| {
                origin.parse::<HeaderValue>().map_err(|e| ConfigError::Invalid {
                    var: "CORS_ORIGINS",
                    reason: format!("contains invalid origin '{origin}': {e}"),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let jwt = JwtConfig::from_lookup(lookup)?;

        Ok(Self {
            host,
            port,
            database_url,
            db_max_connections,
            db_acquire_timeout_secs,
            cors_origins,
            request_timeout_secs,
            log_format,
            jwt,
        })
    }
}

/// Read a variable that has no default. Empty counts as missing.
pub(crate) fn required<F>(lookup: &F, var: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(var)
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing(var))
}

/// Parse a variable, falling back to `default` when it is unset.
pub(crate) fn parse_or<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    match lookup(var) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e| ConfigError::Invalid {
            var,
            reason: format!("has invalid value '{raw}': {e}"),
        }),
    }
}
