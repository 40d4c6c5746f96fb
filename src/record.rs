//! # Submission Status Record
//!
//! Local copy of the service-owned `SubmissionStatus` resource.
//!
//! The whole record is sent back on write, so every field the updater does
//! not interpret is carried through `other` untouched. Dropping one would
//! erase it on the remote side.
//!
//! API Reference: https://rest-docs.synapse.org/rest/org/sagebionetworks/evaluation/model/SubmissionStatus.html

use crate::status::SubmissionOutcome;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Status record for a single submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionStatus {
    /// Submission ID (the service encodes it as a string)
    pub id: String,
    /// Concurrency token echoed back on write
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
    /// Current review state
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_on: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_version: Option<i64>,
    /// Fields not interpreted here (annotations, entityId, canCancel, ...)
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl SubmissionStatus {
    /// Overwrite the review state with a normalized outcome
    ///
    /// Returns the previous value of the `status` field.
    pub fn apply_outcome(&mut self, outcome: SubmissionOutcome) -> String {
        std::mem::replace(&mut self.status, outcome.as_str().to_string())
    }
}
