//! # Credential File
//!
//! Loads login material from a `.synapseConfig`-style INI file:
//!
//! ```ini
//! [authentication]
//! username = challenge-bot
//! authtoken = <personal access token>
//!
//! [endpoints]
//! repoEndpoint = https://repo-prod.prod.sagebase.org/repo/v1
//! ```
//!
//! `SYNAPSE_AUTH_TOKEN` in the environment takes precedence over `authtoken`.

use crate::constants::{AUTH_SECTION, ENDPOINTS_SECTION, ENV_AUTH_TOKEN};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read credential file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: config::ConfigError,
    },

    #[error("no access token: set [authentication] authtoken in {} or SYNAPSE_AUTH_TOKEN", .path.display())]
    MissingToken { path: PathBuf },

    #[error("invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
}

/// Bearer token, wiped from memory on drop
///
/// Copies made while loading are wiped too, except the values held by the
/// `config` crate while the credential file is parsed.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct AccessToken(String);

impl AccessToken {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Raw token for the `Authorization` header
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// Login material read from the credential reference
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: Option<String>,
    pub token: AccessToken,
    /// `[endpoints] repoEndpoint`, if the file sets one
    pub repo_endpoint: Option<String>,
}

impl Credentials {
    /// Build credentials directly from a token (tests, env-only setups)
    #[must_use]
    pub fn from_token(token: impl Into<String>) -> Self {
        Self {
            username: None,
            token: AccessToken::new(token),
            repo_endpoint: None,
        }
    }

    /// Load from the credential file, applying the process environment
    ///
    /// # Errors
    /// Returns an error if the file cannot be parsed or no token is available
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::load_with_env(path, |key| std::env::var(key).ok())
    }

    /// Load from the credential file with an explicit environment lookup
    ///
    /// # Errors
    /// Returns an error if the file cannot be parsed or no token is available
    pub fn load_with_env<F>(path: &Path, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let settings = config::Config::builder()
            .add_source(config::File::new(
                &path.to_string_lossy(),
                config::FileFormat::Ini,
            ))
            .build()
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let read_err = |source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        };
        let auth = section(&settings, AUTH_SECTION).map_err(read_err)?;
        let endpoints = section(&settings, ENDPOINTS_SECTION).map_err(read_err)?;

        let username = lookup(&auth, "username");
        let file_token = lookup(&auth, "authtoken").map(Zeroizing::new);
        let repo_endpoint = lookup(&endpoints, "repoEndpoint");

        let token = match env(ENV_AUTH_TOKEN)
            .map(Zeroizing::new)
            .filter(|t| !t.trim().is_empty())
        {
            Some(token) => {
                debug!("Using access token from {}", ENV_AUTH_TOKEN);
                token
            }
            None => file_token.ok_or_else(|| ConfigError::MissingToken {
                path: path.to_path_buf(),
            })?,
        };

        debug!(
            "Loaded credentials from {} (username: {})",
            path.display(),
            username.as_deref().unwrap_or("<none>")
        );

        Ok(Self {
            username,
            token: AccessToken::new(token.trim()),
            repo_endpoint,
        })
    }
}

/// Read an INI section; a missing section is empty
fn section(
    settings: &config::Config,
    name: &str,
) -> Result<config::Map<String, config::Value>, config::ConfigError> {
    match settings.get_table(name) {
        Ok(table) => Ok(table),
        Err(config::ConfigError::NotFound(_)) => Ok(config::Map::new()),
        Err(e) => Err(e),
    }
}

/// Case-insensitive key lookup, ignoring blank values
///
/// The untrimmed copy is wiped; the parsed `config` tables are not.
fn lookup(table: &config::Map<String, config::Value>, key: &str) -> Option<String> {
    table
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(key))
        .and_then(|(_, v)| v.clone().into_string().ok())
        .map(Zeroizing::new)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
