//! # Configuration
//!
//! Resolves how to reach the submission record store.
//!
//! Precedence for every setting: command line, then environment, then the
//! credential file, then the built-in default.

pub mod credentials;

pub use credentials::{AccessToken, ConfigError, Credentials};

use crate::constants::{DEFAULT_REPO_ENDPOINT, ENV_REPO_ENDPOINT, ENV_TIMEOUT_SECS};
use std::time::Duration;

/// Connection settings for the repository service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSettings {
    /// Repository API base URL, without a trailing slash
    pub repo_endpoint: String,
    /// Per-request timeout; `None` waits for the service indefinitely
    pub timeout: Option<Duration>,
}

impl StoreSettings {
    /// Resolve settings using the process environment
    ///
    /// # Errors
    /// Returns an error if `SYNAPSE_TIMEOUT_SECS` is not a whole number of seconds
    pub fn resolve(
        cli_endpoint: Option<&str>,
        cli_timeout_secs: Option<u64>,
        credentials: &Credentials,
    ) -> Result<Self, ConfigError> {
        Self::resolve_with_env(cli_endpoint, cli_timeout_secs, credentials, |key| {
            std::env::var(key).ok()
        })
    }

    /// Resolve settings with an explicit environment lookup
    ///
    /// # Errors
    /// Returns an error if the timeout from the environment is not a whole number
    pub fn resolve_with_env<F>(
        cli_endpoint: Option<&str>,
        cli_timeout_secs: Option<u64>,
        credentials: &Credentials,
        env: F,
    ) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let repo_endpoint = cli_endpoint
            .map(str::to_string)
            .or_else(|| env(ENV_REPO_ENDPOINT))
            .or_else(|| credentials.repo_endpoint.clone())
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_REPO_ENDPOINT.to_string());

        let timeout_secs = match cli_timeout_secs {
            Some(secs) => Some(secs),
            None => env(ENV_TIMEOUT_SECS)
                .map(|raw| {
                    raw.trim()
                        .parse::<u64>()
                        .map_err(|e| ConfigError::InvalidValue {
                            key: ENV_TIMEOUT_SECS.to_string(),
                            reason: format!("{raw:?}: {e}"),
                        })
                })
                .transpose()?,
        };

        Ok(Self {
            repo_endpoint: repo_endpoint.trim().trim_end_matches('/').to_string(),
            timeout: timeout_secs.filter(|s| *s > 0).map(Duration::from_secs),
        })
    }
}
