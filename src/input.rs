//! # Status Input
//!
//! The raw status comes either straight from the command line or from the
//! results file written by the upstream validation/scoring step:
//!
//! ```json
//! {"submission_status": "VALIDATED", "submission_errors": ""}
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read results file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("results file {} is not valid JSON: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("results file {} has no submission_status", .path.display())]
    MissingStatus { path: PathBuf },
}

/// Upstream step output
#[derive(Debug, Deserialize)]
pub struct ValidationResults {
    #[serde(default)]
    pub submission_status: Option<String>,
    #[serde(default)]
    pub submission_errors: Option<String>,
}

/// Where the raw status label comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusSource {
    Literal(String),
    ResultsFile(PathBuf),
}

impl StatusSource {
    /// Produce the raw status label
    ///
    /// Any string is accepted; mapping unknown labels is the updater's job.
    ///
    /// # Errors
    /// Returns an error if the results file cannot be read or lacks `submission_status`
    pub fn resolve(&self) -> Result<String, InputError> {
        match self {
            StatusSource::Literal(status) => Ok(status.clone()),
            StatusSource::ResultsFile(path) => read_results_status(path),
        }
    }
}

fn read_results_status(path: &Path) -> Result<String, InputError> {
    let contents = std::fs::read_to_string(path).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let results: ValidationResults =
        serde_json::from_str(&contents).map_err(|source| InputError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    if let Some(errors) = results.submission_errors.as_deref().filter(|e| !e.is_empty()) {
        tracing::debug!("Upstream reported submission errors: {}", errors);
    }

    results
        .submission_status
        .ok_or_else(|| InputError::MissingStatus {
            path: path.to_path_buf(),
        })
}
