//! # Status Mapping
//!
//! Maps the coarse status reported by an upstream validation or scoring step
//! onto the two outcomes written back to the submission record.
//!
//! The mapping is total: `VALIDATED` and `SCORED` become `ACCEPTED`, every
//! other label (including `INVALID`, the empty string and labels in a
//! different case) becomes `INVALID`. Unknown labels are never rejected.

use serde::Serialize;
use std::fmt;

/// Label emitted by a validation step that passed
pub const VALIDATED: &str = "VALIDATED";

/// Label emitted by a scoring step that completed
pub const SCORED: &str = "SCORED";

/// Outcome written back to the submission's status record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubmissionOutcome {
    /// Submission passed the upstream step
    Accepted,
    /// Submission failed, or the upstream label was not recognized
    Invalid,
}

impl SubmissionOutcome {
    /// Derive the outcome from a raw status label
    ///
    /// Depends on `raw_status` alone. Matching is exact and case-sensitive.
    #[must_use]
    pub fn from_raw_status(raw_status: &str) -> Self {
        match raw_status {
            VALIDATED | SCORED => SubmissionOutcome::Accepted,
            _ => SubmissionOutcome::Invalid,
        }
    }

    /// Wire representation stored in the record's `status` field
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionOutcome::Accepted => "ACCEPTED",
            SubmissionOutcome::Invalid => "INVALID",
        }
    }
}

impl fmt::Display for SubmissionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
