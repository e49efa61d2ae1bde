//! Configuration loading and representation.
//!
//! Everything comes from environment variables. `from_lookup` takes any
//! key -> value function so parsing can be exercised without touching the
//! process environment.

use std::net::SocketAddr;

use thiserror::Error;

use beerstock_observability::LogFormat;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_API_PREFIX: &str = "/api/v1";
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key} ('{value}'): {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("{0} must be set")]
    Missing(&'static str),
}

/// Process configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// Route prefix for the beer endpoints (always starts with `/`, never ends with one).
    pub api_prefix: String,
    pub use_persistent_store: bool,
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            use_persistent_store: false,
            database_url: None,
            db_max_connections: DEFAULT_DB_MAX_CONNECTIONS,
            log_format: LogFormat::Json,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_raw = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw.parse::<SocketAddr>().map_err(|e| ConfigError::Invalid {
            key: "BIND_ADDR",
            value: bind_raw.clone(),
            reason: e.to_string(),
        })?;

        let prefix_raw = get("API_PREFIX").unwrap_or_else(|| DEFAULT_API_PREFIX.to_string());
        let api_prefix = normalize_prefix(&prefix_raw)?;

        let use_persistent_store = match get("USE_PERSISTENT_STORES") {
            None => false,
            Some(v) => parse_bool(&v).ok_or_else(|| ConfigError::Invalid {
                key: "USE_PERSISTENT_STORES",
                value: v.clone(),
                reason: "expected true/false".to_string(),
            })?,
        };

        let database_url = get("DATABASE_URL");
        if use_persistent_store && database_url.is_none() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }

        let db_max_connections = match get("DATABASE_MAX_CONNECTIONS") {
            None => DEFAULT_DB_MAX_CONNECTIONS,
            Some(v) => match v.trim().parse::<u32>() {
                Ok(n) if n >= 1 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "DATABASE_MAX_CONNECTIONS",
                        value: v,
                        reason: "expected a positive integer".to_string(),
                    });
                }
            },
        };

        let log_format = match get("LOG_FORMAT") {
            None => LogFormat::default(),
            Some(v) => v.parse::<LogFormat>().map_err(|e| ConfigError::Invalid {
                key: "LOG_FORMAT",
                value: v.clone(),
                reason: e.to_string(),
            })?,
        };

        Ok(Self {
            bind_addr,
            api_prefix,
            use_persistent_store,
            database_url,
            db_max_connections,
            log_format,
        })
    }
}

fn parse_bool(v: &str) -> Option<bool> {
    match v.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

fn normalize_prefix(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !trimmed.starts_with('/') {
        return Err(ConfigError::Invalid {
            key: "API_PREFIX",
            value: raw.to_string(),
            reason: "must start with '/' and name at least one segment".to_string(),
        });
    }
    Ok(trimmed.to_string())
}
