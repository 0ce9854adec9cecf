//! Runtime settings read from `GITEA_LINE_*` environment variables.

use std::env;
use std::time::Duration;

use crate::{Error, Result};

const CONFIRM_ENV: &str = "GITEA_LINE_CONFIRM";
const LAUNCHER_ENV: &str = "GITEA_LINE_LAUNCHER";
const WORKERS_ENV: &str = "GITEA_LINE_WORKERS";
const BROWSER_TIMEOUT_ENV: &str = "GITEA_LINE_BROWSER_TIMEOUT_SECS";

const DEFAULT_LAUNCHER: &str = "system";
const DEFAULT_WORKERS: usize = 2;
const DEFAULT_BROWSER_TIMEOUT_SECS: u64 = 10;

/// Settings shared by the library services and the CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkConfig {
    /// Ask before opening a URL.
    pub confirm: bool,
    /// Id of the browser launcher to use.
    pub launcher: String,
    /// Resolution worker threads.
    pub workers: usize,
    /// How long the system opener is waited on.
    pub browser_timeout: Duration,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            confirm: true,
            launcher: DEFAULT_LAUNCHER.to_string(),
            workers: DEFAULT_WORKERS,
            browser_timeout: Duration::from_secs(DEFAULT_BROWSER_TIMEOUT_SECS),
        }
    }
}

impl LinkConfig {
    /// Defaults overridden by the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for values that do not parse.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each key.
    ///
    /// Unset and blank values keep the default.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for values that do not parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let mut config = Self::default();

        if let Some(value) = get(CONFIRM_ENV) {
            config.confirm = parse_bool(CONFIRM_ENV, &value)?;
        }
        if let Some(value) = get(LAUNCHER_ENV) {
            config.launcher = value;
        }
        if let Some(value) = get(WORKERS_ENV) {
            config.workers = match value.parse::<usize>() {
                Ok(workers) if workers > 0 => workers,
                _ => return Err(config_error(WORKERS_ENV, &value, "expected a positive integer")),
            };
        }
        if let Some(value) = get(BROWSER_TIMEOUT_ENV) {
            let secs = value
                .parse::<u64>()
                .map_err(|_| config_error(BROWSER_TIMEOUT_ENV, &value, "expected seconds"))?;
            config.browser_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(config_error(key, value, "expected true or false")),
    }
}

fn config_error(key: &'static str, value: &str, expected: &'static str) -> Error {
    Error::Config {
        key,
        value: value.to_string(),
        expected,
    }
}
