//! # Response Structures
//!
//! JSON payloads returned by the Synapse repository service that the updater
//! reads besides the status record itself.

use serde::Deserialize;

/// Error body returned with non-success responses
///
/// API Reference: https://rest-docs.synapse.org/rest/org/sagebionetworks/repo/model/ErrorResponse.html
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ErrorResponse {
    /// Human-readable explanation
    pub reason: String,
    #[serde(default)]
    pub error_code: Option<String>,
}

/// Profile of the caller, used to confirm the token is accepted
///
/// Returned by `GET /userProfile`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserProfile {
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
}

/// Pull the service's `reason` out of an error body, falling back to the raw text
pub(crate) fn error_reason(body: &str) -> String {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(ErrorResponse {
            reason,
            error_code: Some(code),
        }) => format!("{reason} ({code})"),
        Ok(ErrorResponse { reason, .. }) => reason,
        Err(_) if body.trim().is_empty() => "<empty response body>".to_string(),
        Err(_) => body.trim().to_string(),
    }
}
