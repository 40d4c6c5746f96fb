//! # Provider Modules
//!
//! Abstract interface for the service that owns submission status records.
//!
//! The updater only ever talks to a [`SubmissionStatusStore`]; the Synapse
//! REST client is one implementation and tests supply in-memory ones.

use crate::config::{AccessToken, Credentials};
use crate::error::StoreError;
use crate::record::SubmissionStatus;
use async_trait::async_trait;

pub mod synapse;

/// Authenticated principal plus the token used for every call
///
/// Obtained from [`SubmissionStatusStore::authenticate`] and handed back to
/// [`SubmissionStatusStore::logout`]. The token is zeroized when dropped; the
/// HTTP layer only sees it through a header marked sensitive.
#[derive(Debug)]
pub struct Session {
    pub owner_id: Option<String>,
    pub user_name: Option<String>,
    token: AccessToken,
}

impl Session {
    #[must_use]
    pub fn new(token: AccessToken, owner_id: Option<String>, user_name: Option<String>) -> Self {
        Self {
            owner_id,
            user_name,
            token,
        }
    }

    /// Token sent as the bearer credential
    #[must_use]
    pub fn token(&self) -> &AccessToken {
        &self.token
    }

    /// Name for log lines; never the token
    #[must_use]
    pub fn principal(&self) -> &str {
        self.user_name
            .as_deref()
            .or(self.owner_id.as_deref())
            .unwrap_or("<unknown>")
    }
}

/// Record store for submission status
#[async_trait]
pub trait SubmissionStatusStore: Send + Sync {
    /// Open a session for the given credentials
    async fn authenticate(&self, credentials: &Credentials) -> Result<Session, StoreError>;

    /// Fetch the current status record for a submission
    async fn fetch_status(
        &self,
        session: &Session,
        submission_id: u64,
    ) -> Result<SubmissionStatus, StoreError>;

    /// Overwrite the remote record with the local copy
    /// Returns the record as stored by the service
    async fn store_status(
        &self,
        session: &Session,
        record: &SubmissionStatus,
    ) -> Result<SubmissionStatus, StoreError>;

    /// Release the session
    ///
    /// Stores without a server-side session just drop it, which zeroizes the token.
    async fn logout(&self, session: Session) -> Result<(), StoreError> {
        drop(session);
        Ok(())
    }
}
