//! # Constants
//!
//! Shared constants used throughout the updater.
//!
//! Endpoint values can be overridden via the credential file, environment
//! variables, or the command line.

/// Default Synapse repository service endpoint
pub const DEFAULT_REPO_ENDPOINT: &str = "https://repo-prod.prod.sagebase.org/repo/v1";

/// Environment variable holding a personal access token (overrides the config file)
pub const ENV_AUTH_TOKEN: &str = "SYNAPSE_AUTH_TOKEN";

/// Environment variable overriding the repository endpoint
pub const ENV_REPO_ENDPOINT: &str = "SYNAPSE_REPO_ENDPOINT";

/// Environment variable setting a per-request timeout in seconds
pub const ENV_TIMEOUT_SECS: &str = "SYNAPSE_TIMEOUT_SECS";

/// Credential file section holding login material
pub const AUTH_SECTION: &str = "authentication";

/// Credential file section holding endpoint overrides
pub const ENDPOINTS_SECTION: &str = "endpoints";

/// Default tracing filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "update_submission_status=info,submission_status_updater=info";
