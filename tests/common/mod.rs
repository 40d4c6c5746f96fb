//! Common test utilities for Pact integration tests
//!
//! Provides rustls setup and builders for the Synapse store under test.

#![allow(dead_code, reason = "each test crate uses a different subset")]

use serde_json::{json, Value};
use std::sync::Once;
use submission_status_updater::config::StoreSettings;
use submission_status_updater::provider::synapse::{install_crypto_provider, SynapseRest};

static RUSTLS_INIT: Once = Once::new();

/// Token every interaction expects
pub const TEST_TOKEN: &str = "test-token";

/// Initialize rustls crypto provider for tests
///
/// Uses a `Once` to ensure it's only called once across all tests.
pub fn init_rustls() {
    RUSTLS_INIT.call_once(|| {
        install_crypto_provider();
    });
}

/// Synapse client pointed at a Pact mock server
pub fn store_for(mock_server_url: &str) -> SynapseRest {
    let base_url = mock_server_url.trim_end_matches('/');
    SynapseRest::new(&StoreSettings {
        repo_endpoint: format!("{base_url}/repo/v1"),
        timeout: None,
    })
    .expect("Failed to create Synapse client")
}

/// Status record as the service returns it
pub fn submission_status(submission_id: u64, status: &str, etag: &str) -> Value {
    json!({
        "id": submission_id.to_string(),
        "etag": etag,
        "modifiedOn": "2024-01-01T00:00:00.000Z",
        "status": status,
        "statusVersion": 1,
        "entityId": "syn26012345",
        "versionNumber": 1,
        "canCancel": false
    })
}

/// Profile returned for the test token
pub fn user_profile() -> Value {
    json!({
        "ownerId": "3421234",
        "userName": "challenge-bot",
        "etag": "00000000-0000-0000-0000-000000000000"
    })
}
