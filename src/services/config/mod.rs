//! Run configuration: the fixed resource list plus the few knobs read from
//! the environment.

pub mod models;

pub use models::*;

use crate::types::errors::ConfigError;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const ENV_FETCH_TIMEOUT: &str = "SPOJE_FETCH_TIMEOUT_SECS";
pub const ENV_INVALIDATE_CACHE: &str = "SPOJE_INVALIDATE_CACHE";

/// Directory containing the running executable. All relative output paths
/// resolve against it, never against the caller's current directory.
pub fn tool_dir() -> Result<PathBuf, ConfigError> {
    let exe = std::env::current_exe().map_err(ConfigError::ToolDir)?;
    exe.parent().map(Path::to_path_buf).ok_or_else(|| {
        ConfigError::ToolDir(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("{} has no parent directory", exe.display()),
        ))
    })
}

impl RefreshConfig {
    /// Default resources in `work_dir`, with overrides from the process
    /// environment and an optional `.env` file next to the tool.
    pub fn from_env(work_dir: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let work_dir = work_dir.into();
        load_dotenv(&work_dir.join(".env"))?;
        Self::from_lookup(work_dir, |key| std::env::var(key).ok())
    }

    /// Same as [`RefreshConfig::from_env`] but reading variables through
    /// `lookup`.
    pub fn from_lookup<F>(work_dir: impl Into<PathBuf>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new(work_dir, default_resources()?);

        if let Some(value) = lookup(ENV_FETCH_TIMEOUT) {
            config.fetch_timeout = Some(parse_timeout(&value)?);
        }
        if let Some(value) = lookup(ENV_INVALIDATE_CACHE) {
            config.invalidate_cache = parse_flag(ENV_INVALIDATE_CACHE, &value)?;
        }

        Ok(config)
    }
}

fn load_dotenv(path: &Path) -> Result<(), ConfigError> {
    match dotenvy::from_path(path) {
        Ok(()) => {
            log::debug!("Loaded environment from {}", path.display());
            Ok(())
        }
        Err(e) if e.not_found() => Ok(()),
        Err(error) => Err(ConfigError::DotEnv {
            path: path.to_path_buf(),
            error,
        }),
    }
}

fn parse_timeout(value: &str) -> Result<Duration, ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidValue {
        key: ENV_FETCH_TIMEOUT.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    };

    let secs: u64 = value
        .trim()
        .parse()
        .map_err(|_| invalid("expected a whole number of seconds"))?;
    if secs == 0 {
        return Err(invalid("must be greater than zero"));
    }
    Ok(Duration::from_secs(secs))
}

fn parse_flag(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            reason: "expected true or false".to_string(),
        }),
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
