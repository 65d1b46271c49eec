use std::env;
use std::path::PathBuf;

use lazy_regex::regex_is_match;
use thiserror::Error;

use crate::domain::snapshot::SNAPSHOT_KEY;

pub const DATA_DIR_VAR: &str = "WIEZEN_DATA_DIR";
pub const SNAPSHOT_KEY_VAR: &str = "WIEZEN_SNAPSHOT_KEY";
pub const LOG_VAR: &str = "WIEZEN_LOG";
pub const ASSISTANT_KEY_VAR: &str = "WIEZEN_ASSISTANT_KEY";

const DEFAULT_DATA_DIR: &str = ".wiezen";
const DEFAULT_LOG: &str = "info";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {var}: {detail}")]
    Invalid { var: &'static str, detail: String },
}

/// Runtime configuration read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory of the file-backed snapshot store
    pub data_dir: PathBuf,
    /// Logical key the session is saved under
    pub snapshot_key: String,
    /// Default tracing filter when `RUST_LOG` is unset
    pub log_filter: String,
    /// Rule assistant credential; absent disables the assistant
    pub assistant_key: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Build from any variable source (tests pass a map).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = lookup(DATA_DIR_VAR)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATA_DIR.to_string());

        let snapshot_key = lookup(SNAPSHOT_KEY_VAR).unwrap_or_else(|| SNAPSHOT_KEY.to_string());
        if !regex_is_match!(r"^[A-Za-z0-9_-]+$", &snapshot_key) {
            return Err(ConfigError::Invalid {
                var: SNAPSHOT_KEY_VAR,
                detail: format!("'{snapshot_key}' must match [A-Za-z0-9_-]+"),
            });
        }

        let log_filter = lookup(LOG_VAR)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG.to_string());

        let assistant_key = lookup(ASSISTANT_KEY_VAR).filter(|v| !v.trim().is_empty());

        Ok(Self {
            data_dir: PathBuf::from(data_dir),
            snapshot_key,
            log_filter,
            assistant_key,
        })
    }
}
