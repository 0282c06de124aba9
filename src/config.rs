//! Server configuration from environment variables.
//!
//! | variable                   | default    |
//! |----------------------------|------------|
//! | `HOST`                     | `0.0.0.0`  |
//! | `PORT`                     | `8080`     |
//! | `DATA_DIR`                 | `data`     |
//! | `OPERATOR_USERNAME`        | `operator` |
//! | `OPERATOR_PASSWORD_SHA256` | unset      |
//! | `RUN_INACTIVITY_HOURS`     | `12`       |
//! | `PLAYOFF_DATE_QF`          | unset      |
//! | `PLAYOFF_DATE_SF`          | unset      |
//! | `PLAYOFF_DATE_FINAL`       | unset      |
//! | `PLAYOFF_DATE_THIRD_PLACE` | unset      |
//!
//! Without `OPERATOR_PASSWORD_SHA256` nobody can log in.

use crate::models::PlayoffDates;
use sha2::{Digest, Sha256};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ConfigError {
    /// A variable is set but cannot be parsed.
    Invalid { key: &'static str, value: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Invalid { key, value } => {
                write!(f, "Invalid value for {}: '{}'", key, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Directory holding `<group>.json` / `<group>.csv` standings files.
    pub data_dir: PathBuf,
    pub operator_username: String,
    /// Lowercase hex SHA-256 of the operator password.
    pub operator_password_sha256: Option<String>,
    /// Runs untouched for this long are dropped.
    pub run_inactivity: Duration,
    /// Dates shown on the bracket of every new run.
    pub playoff_dates: PlayoffDates,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            data_dir: PathBuf::from("data"),
            operator_username: "operator".to_string(),
            operator_password_sha256: None,
            run_inactivity: Duration::from_secs(12 * 3600),
            playoff_dates: PlayoffDates::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or blank keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let mut config = Self::default();

        if let Some(host) = get("HOST") {
            config.host = host;
        }
        if let Some(port) = get("PORT") {
            config.port = port.parse().map_err(|_| ConfigError::Invalid {
                key: "PORT",
                value: port.clone(),
            })?;
        }
        if let Some(dir) = get("DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(username) = get("OPERATOR_USERNAME") {
            config.operator_username = username;
        }
        if let Some(hash) = get("OPERATOR_PASSWORD_SHA256") {
            let hash = hash.to_ascii_lowercase();
            if hash.len() != 64 || !hash.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(ConfigError::Invalid {
                    key: "OPERATOR_PASSWORD_SHA256",
                    value: hash,
                });
            }
            config.operator_password_sha256 = Some(hash);
        }
        if let Some(hours) = get("RUN_INACTIVITY_HOURS") {
            let seconds = hours
                .parse::<u64>()
                .ok()
                .and_then(|h| h.checked_mul(3600))
                .ok_or_else(|| ConfigError::Invalid {
                    key: "RUN_INACTIVITY_HOURS",
                    value: hours.clone(),
                })?;
            config.run_inactivity = Duration::from_secs(seconds);
        }
        config.playoff_dates = PlayoffDates {
            quarterfinal: get("PLAYOFF_DATE_QF"),
            semifinal: get("PLAYOFF_DATE_SF"),
            final_match: get("PLAYOFF_DATE_FINAL"),
            third_place: get("PLAYOFF_DATE_THIRD_PLACE"),
        };
        Ok(config)
    }

    /// Check operator credentials against the configured username and password digest.
    pub fn check_credentials(&self, username: &str, password: &str) -> bool {
        let Some(expected) = &self.operator_password_sha256 else {
            return false;
        };
        username == self.operator_username && password_sha256(password) == *expected
    }
}

/// Lowercase hex SHA-256 digest of `password`.
pub fn password_sha256(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}
