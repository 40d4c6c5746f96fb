//! # Status Operations
//!
//! Implementation of [`SubmissionStatusStore`] for the Synapse REST API.

use super::responses::{error_reason, UserProfile};
use super::{submission_status_path, SynapseRest};
use crate::config::Credentials;
use crate::error::StoreError;
use crate::provider::{Session, SubmissionStatusStore};
use crate::record::SubmissionStatus;
use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use std::time::Instant;
use tracing::{debug, info, info_span, Instrument};

/// Read the error body; failures to read it become an empty reason
async fn failure_reason(response: reqwest::Response) -> String {
    error_reason(&response.text().await.unwrap_or_default())
}

fn check_record_id(record: &SubmissionStatus, submission_id: u64) -> Result<(), StoreError> {
    if record.id.trim() == submission_id.to_string() {
        Ok(())
    } else {
        Err(StoreError::MalformedRecord {
            submission_id,
            reason: format!("service returned record for submission {}", record.id),
        })
    }
}

#[async_trait]
impl SubmissionStatusStore for SynapseRest {
    async fn authenticate(&self, credentials: &Credentials) -> Result<Session, StoreError> {
        let span = info_span!("synapse.authenticate", endpoint = %self.base_url());

        async move {
            let start = Instant::now();
            let response = self
                .make_request(
                    Method::GET,
                    "userProfile",
                    &credentials.token,
                    None::<&()>,
                )
                .send()
                .await
                .map_err(|source| StoreError::Transport {
                    operation: "authenticate",
                    source,
                })?;

            match response.status() {
                status if status.is_success() => {
                    let profile: UserProfile =
                        response
                            .json()
                            .await
                            .map_err(|source| StoreError::Transport {
                                operation: "authenticate",
                                source,
                            })?;

                    if let (Some(expected), Some(actual)) =
                        (credentials.username.as_deref(), profile.user_name.as_deref())
                    {
                        if !expected.eq_ignore_ascii_case(actual) {
                            debug!(
                                "Token belongs to {} but credential file names {}",
                                actual, expected
                            );
                        }
                    }

                    let session = Session::new(
                        credentials.token.clone(),
                        profile.owner_id,
                        profile.user_name,
                    );
                    info!(
                        "Authenticated to Synapse as {} in {}ms",
                        session.principal(),
                        start.elapsed().as_millis()
                    );
                    Ok(session)
                }
                status @ (StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) => {
                    Err(StoreError::Authentication {
                        status: status.as_u16(),
                        reason: failure_reason(response).await,
                    })
                }
                status => Err(StoreError::Api {
                    operation: "authenticate",
                    status: status.as_u16(),
                    reason: failure_reason(response).await,
                }),
            }
        }
        .instrument(span)
        .await
    }

    async fn fetch_status(
        &self,
        session: &Session,
        submission_id: u64,
    ) -> Result<SubmissionStatus, StoreError> {
        let span = info_span!("synapse.submission_status.fetch", submission.id = submission_id);

        async move {
            let response = self
                .send(
                    "fetch submission status",
                    Method::GET,
                    &submission_status_path(submission_id),
                    session,
                    None::<&()>,
                )
                .await?;

            match response.status() {
                status if status.is_success() => {
                    let record: SubmissionStatus =
                        response
                            .json()
                            .await
                            .map_err(|source| StoreError::Transport {
                                operation: "fetch submission status",
                                source,
                            })?;
                    check_record_id(&record, submission_id)?;
                    debug!(
                        "Fetched status record for submission {} (status: {}, etag: {})",
                        submission_id,
                        record.status,
                        record.etag.as_deref().unwrap_or("<none>")
                    );
                    Ok(record)
                }
                StatusCode::NOT_FOUND => Err(StoreError::RecordNotFound {
                    submission_id,
                    reason: failure_reason(response).await,
                }),
                StatusCode::UNAUTHORIZED => Err(StoreError::Authentication {
                    status: StatusCode::UNAUTHORIZED.as_u16(),
                    reason: failure_reason(response).await,
                }),
                status => Err(StoreError::Api {
                    operation: "fetch submission status",
                    status: status.as_u16(),
                    reason: failure_reason(response).await,
                }),
            }
        }
        .instrument(span)
        .await
    }

    async fn store_status(
        &self,
        session: &Session,
        record: &SubmissionStatus,
    ) -> Result<SubmissionStatus, StoreError> {
        let submission_id =
            record
                .id
                .trim()
                .parse::<u64>()
                .map_err(|e| StoreError::InvalidRecordId {
                    id: record.id.clone(),
                    reason: e.to_string(),
                })?;
        let span = info_span!(
            "synapse.submission_status.store",
            submission.id = submission_id,
            submission.status = %record.status
        );

        async move {
            let response = self
                .send(
                    "store submission status",
                    Method::PUT,
                    &submission_status_path(submission_id),
                    session,
                    Some(record),
                )
                .await?;

            match response.status() {
                status if status.is_success() => {
                    let stored: SubmissionStatus =
                        response
                            .json()
                            .await
                            .map_err(|source| StoreError::Transport {
                                operation: "store submission status",
                                source,
                            })?;
                    info!(
                        "Stored status {} for submission {}",
                        stored.status, submission_id
                    );
                    Ok(stored)
                }
                StatusCode::CONFLICT | StatusCode::PRECONDITION_FAILED => {
                    Err(StoreError::Conflict {
                        submission_id,
                        reason: failure_reason(response).await,
                    })
                }
                StatusCode::NOT_FOUND => Err(StoreError::RecordNotFound {
                    submission_id,
                    reason: failure_reason(response).await,
                }),
                status => Err(StoreError::Store {
                    submission_id,
                    status: status.as_u16(),
                    reason: failure_reason(response).await,
                }),
            }
        }
        .instrument(span)
        .await
    }
}
