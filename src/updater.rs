//! # Status Updater
//!
//! The read-modify-write sequence: authenticate, fetch the record, set its
//! `status` to the normalized outcome, store it, log out.
//!
//! The session is scoped to [`update_status`]: once authentication succeeds,
//! logout runs on every exit path, including a failed fetch or store.
//! A logout failure never masks the primary result.

use crate::config::Credentials;
use crate::error::StoreError;
use crate::provider::{Session, SubmissionStatusStore};
use crate::record::SubmissionStatus;
use crate::status::SubmissionOutcome;
use anyhow::{Context, Result};
use tracing::{info, info_span, warn, Instrument};

/// Normalize `raw_status` and write it to the submission's status record
///
/// Returns `true` once both the fetch and the store have succeeded.
///
/// # Errors
/// Returns an error if authentication, the fetch, or the store fails.
/// Nothing is written when authentication or the fetch fails.
pub async fn update_status<S>(
    store: &S,
    credentials: &Credentials,
    submission_id: u64,
    raw_status: &str,
) -> Result<bool>
where
    S: SubmissionStatusStore + ?Sized,
{
    let outcome = SubmissionOutcome::from_raw_status(raw_status);
    let span = info_span!(
        "submission.update_status",
        submission.id = submission_id,
        status.raw = raw_status,
        status.outcome = %outcome
    );

    async move {
        info!(
            "Mapping status {:?} to {} for submission {}",
            raw_status, outcome, submission_id
        );

        let session = store
            .authenticate(credentials)
            .await
            .context("Failed to authenticate to the submission service")?;

        let result = apply_outcome(store, &session, submission_id, outcome).await;

        if let Err(e) = store.logout(session).await {
            warn!("Failed to log out after updating submission {}: {}", submission_id, e);
        }

        let stored = result.with_context(|| {
            format!("Failed to update status for submission {submission_id}")
        })?;
        info!(
            "Submission {} status is now {}",
            submission_id, stored.status
        );
        Ok(true)
    }
    .instrument(span)
    .await
}

async fn apply_outcome<S>(
    store: &S,
    session: &Session,
    submission_id: u64,
    outcome: SubmissionOutcome,
) -> Result<SubmissionStatus, StoreError>
where
    S: SubmissionStatusStore + ?Sized,
{
    let mut record = store.fetch_status(session, submission_id).await?;
    let previous = record.apply_outcome(outcome);
    info!(
        "Updating submission {} status: {} -> {}",
        submission_id, previous, outcome
    );
    store.store_status(session, &record).await
}
