//! Environment-driven settings, read once at startup.
//!
//! | Variable | Default |
//! |---|---|
//! | `PORT` | `8000` |
//! | `DATABASE_PATH` | `data/portfolio.sqlite` |
//! | `FOLIO_API_URL` | `http://localhost:8000/api` |
//! | `FOLIO_TIMEOUT_SECS` | `10` |

use crate::client::api_client::check_base_url;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

pub const PORT_VAR: &str = "PORT";
pub const DATABASE_PATH_VAR: &str = "DATABASE_PATH";
pub const API_URL_VAR: &str = "FOLIO_API_URL";
pub const TIMEOUT_VAR: &str = "FOLIO_TIMEOUT_SECS";

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Port the API server listens on.
    pub port: u16,
    /// SQLite file backing the API.
    pub database_path: PathBuf,
    /// Absolute `http`/`https` base URL the client reads from. Fixed for the process lifetime.
    pub api_url: String,
    /// Per-request timeout for the client.
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8000,
            database_path: PathBuf::from("data/portfolio.sqlite"),
            api_url: "http://localhost:8000/api".to_string(),
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl Config {
    /// Loads settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads settings through `lookup`, which returns `None` for unset variables.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let timeout_secs: u64 = try_load(&lookup, TIMEOUT_VAR, "10")?;
        if timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                key: TIMEOUT_VAR.to_string(),
                value: "0".to_string(),
                reason: "timeout must be at least one second".to_string(),
            });
        }

        let api_url: String = try_load(&lookup, API_URL_VAR, "http://localhost:8000/api")?;
        if let Err(reason) = check_base_url(&api_url) {
            warn!("Invalid {API_URL_VAR} value: {reason}");
            return Err(ConfigError::Invalid {
                key: API_URL_VAR.to_string(),
                value: api_url,
                reason,
            });
        }

        Ok(Self {
            port: try_load(&lookup, PORT_VAR, "8000")?,
            database_path: try_load(&lookup, DATABASE_PATH_VAR, "data/portfolio.sqlite")?,
            api_url,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn try_load<T, F>(lookup: &F, key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    value.parse().map_err(|e: T::Err| {
        warn!("Invalid {key} value: {e}");
        ConfigError::Invalid {
            key: key.to_string(),
            value: value.clone(),
            reason: e.to_string(),
        }
    })
}
