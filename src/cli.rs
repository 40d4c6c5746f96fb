//! # Command Line
//!
//! Argument model for `update-submission-status`.
//!
//! ## Usage
//!
//! ```bash
//! # Map an explicit label
//! update-submission-status --submission-id 9731234 --synapse-config ~/.synapseConfig --status VALIDATED
//!
//! # Read the label from the validation step's results file
//! update-submission-status -s 9731234 -c ~/.synapseConfig --results results.json --output finished.json
//! ```

use crate::input::StatusSource;
use anyhow::{anyhow, Result};
use clap::Parser;
use std::path::PathBuf;

/// Version string including the embedded build metadata
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("BUILD_GIT_HASH"),
    ", built ",
    env!("BUILD_DATETIME"),
    ")"
);

/// Normalize a submission's status and write it back to Synapse
#[derive(Debug, Parser)]
#[command(name = "update-submission-status")]
#[command(
    version,
    long_version = LONG_VERSION,
    about = "Normalize a submission's status and write it back to Synapse",
    long_about = None,
    after_help = "\
Status mapping:
  VALIDATED, SCORED  -> ACCEPTED
  anything else      -> INVALID

Examples:
  update-submission-status -s 9731234 -c ~/.synapseConfig --status SCORED
  update-submission-status -s 9731234 -c ~/.synapseConfig --results results.json
"
)]
pub struct Cli {
    /// Submission ID whose status record is updated
    #[arg(
        short = 's',
        long = "submission-id",
        visible_alias = "submissionid",
        value_name = "ID",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub submission_id: u64,

    /// Credential file (.synapseConfig) used to authenticate
    #[arg(
        short = 'c',
        long = "synapse-config",
        visible_alias = "synapse_config",
        value_name = "PATH"
    )]
    pub synapse_config: PathBuf,

    /// Raw status label from the upstream step (any string is accepted)
    #[arg(
        long,
        value_name = "LABEL",
        allow_hyphen_values = true,
        required_unless_present = "results",
        conflicts_with = "results"
    )]
    pub status: Option<String>,

    /// Read the raw status from a results JSON file (`submission_status` field)
    #[arg(long, value_name = "PATH")]
    pub results: Option<PathBuf>,

    /// Write the completion signal to this file instead of stdout
    #[arg(short = 'o', long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Repository endpoint (overrides SYNAPSE_REPO_ENDPOINT and the credential file)
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Per-request timeout in seconds (0 disables; default: no timeout)
    #[arg(long, value_name = "SECONDS")]
    pub timeout_secs: Option<u64>,
}

impl Cli {
    /// Where the raw status label comes from
    ///
    /// # Errors
    /// Returns an error if neither `--status` nor `--results` was given
    pub fn status_source(&self) -> Result<StatusSource> {
        match (&self.status, &self.results) {
            (Some(status), _) => Ok(StatusSource::Literal(status.clone())),
            (None, Some(path)) => Ok(StatusSource::ResultsFile(path.clone())),
            (None, None) => Err(anyhow!("either --status or --results is required")),
        }
    }
}
