//! Synapse REST Client
//!
//! Native REST implementation of [`SubmissionStatusStore`](crate::provider::SubmissionStatusStore)
//! against the Synapse repository service.
//! Uses reqwest (rustls) for HTTP and personal access tokens for authentication.
//!
//! This implementation:
//! - Works directly with Pact HTTP mock servers (point the endpoint at the mock)
//! - Performs exactly one request per store operation, with no retries
//!
//! References:
//! - [Synapse REST API](https://rest-docs.synapse.org/rest/)

mod operations;
pub(crate) mod responses;

use crate::config::{AccessToken, StoreSettings};
use crate::error::StoreError;
use crate::provider::Session;
use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use tracing::debug;

const USER_AGENT: &str = concat!("submission-status-updater/", env!("CARGO_PKG_VERSION"));

/// Synapse repository REST client
pub struct SynapseRest {
    http_client: Client,
    base_url: String,
}

impl std::fmt::Debug for SynapseRest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SynapseRest")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl SynapseRest {
    /// Create a client for the resolved repository endpoint
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built (TLS backend setup)
    pub fn new(settings: &StoreSettings) -> Result<Self, StoreError> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build().map_err(|source| StoreError::Transport {
            operation: "client setup",
            source,
        })?;

        Ok(Self {
            http_client,
            base_url: settings.repo_endpoint.trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build an HTTP request with authentication headers
    ///
    /// `bearer_auth` marks the `Authorization` header sensitive.
    fn make_request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        token: &AccessToken,
        body: Option<&B>,
    ) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));

        let mut request = self
            .http_client
            .request(method, url)
            .bearer_auth(token.expose())
            .header("Accept", "application/json");

        if let Some(body) = body {
            request = request.json(body);
        }

        request
    }

    /// Send a request carrying the session's token
    async fn send<B: Serialize + ?Sized>(
        &self,
        operation: &'static str,
        method: Method,
        path: &str,
        session: &Session,
        body: Option<&B>,
    ) -> Result<reqwest::Response, StoreError> {
        self.make_request(method, path, session.token(), body)
            .send()
            .await
            .map_err(|source| StoreError::Transport { operation, source })
    }
}

/// Install ring as the process-wide rustls crypto provider
///
/// Returns `false` if a provider was already installed.
pub fn install_crypto_provider() -> bool {
    let installed = rustls::crypto::ring::default_provider()
        .install_default()
        .is_ok();
    if !installed {
        debug!("rustls crypto provider already installed");
    }
    installed
}

fn submission_status_path(submission_id: u64) -> String {
    format!("evaluation/submission/{submission_id}/status")
}
