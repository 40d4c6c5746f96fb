//! # Errors
//!
//! Typed failures from the submission record store.
//!
//! Every variant is fatal to an update. Messages carry the service's own
//! `reason` text verbatim.

use thiserror::Error;

/// Failure reported by a [`SubmissionStatusStore`](crate::provider::SubmissionStatusStore)
#[derive(Debug, Error)]
pub enum StoreError {
    /// The credential was rejected or could not be verified
    #[error("authentication failed (HTTP {status}): {reason}")]
    Authentication { status: u16, reason: String },

    /// No status record exists for the submission
    #[error("no status record for submission {submission_id}: {reason}")]
    RecordNotFound { submission_id: u64, reason: String },

    /// The record changed remotely between fetch and store
    #[error("status record for submission {submission_id} was modified concurrently: {reason}")]
    Conflict { submission_id: u64, reason: String },

    /// The service refused the write for any other reason
    #[error("failed to store status for submission {submission_id} (HTTP {status}): {reason}")]
    Store {
        submission_id: u64,
        status: u16,
        reason: String,
    },

    /// Any other non-success response
    #[error("{operation} failed (HTTP {status}): {reason}")]
    Api {
        operation: &'static str,
        status: u16,
        reason: String,
    },

    /// The request never produced a response, or the body could not be decoded
    #[error("{operation} request failed: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The record returned by the service does not match the requested submission
    #[error("malformed status record for submission {submission_id}: {reason}")]
    MalformedRecord { submission_id: u64, reason: String },

    /// The record's own `id` is not a submission ID
    #[error("status record id {id:?} is not a submission ID: {reason}")]
    InvalidRecordId { id: String, reason: String },
}

impl StoreError {
    /// Whether the failure happened before any record was read
    #[must_use]
    pub fn is_authentication(&self) -> bool {
        matches!(self, StoreError::Authentication { .. })
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::RecordNotFound { .. })
    }
}
