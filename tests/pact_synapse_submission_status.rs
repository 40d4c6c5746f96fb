//! Pact contract tests for the Synapse submission status API
//!
//! These tests define the contract between the updater and the Synapse
//! repository service. Each test drives the real REST store against a Pact
//! mock server; the mock server fails the test on drop if an expected
//! request was never made or an unexpected one arrived.

#[cfg(test)]
mod common;

use common::{init_rustls, store_for, submission_status, user_profile, TEST_TOKEN};
use pact_consumer::prelude::*;
use serde_json::json;
use submission_status_updater::config::Credentials;
use submission_status_updater::provider::SubmissionStatusStore;
use submission_status_updater::{update_status, StoreError};

const CONSUMER: &str = "Submission-Status-Updater";
const PROVIDER: &str = "Synapse-Repository";

fn credentials() -> Credentials {
    Credentials::from_token(TEST_TOKEN)
}

fn authenticate_interaction(pact_builder: &mut PactBuilder) {
    pact_builder.interaction("fetch the caller's profile with a valid token", "", |mut i| {
        i.given("a user with a valid personal access token");
        i.request
            .method("GET")
            .path("/repo/v1/userProfile")
            .header("authorization", format!("Bearer {TEST_TOKEN}"));
        i.response
            .status(200)
            .header("content-type", "application/json")
            .json_body(user_profile());
        i
    });
}

#[tokio::test]
async fn test_validated_submission_is_accepted_contract() {
    init_rustls();
    let mut pact_builder = PactBuilder::new(CONSUMER, PROVIDER);
    authenticate_interaction(&mut pact_builder);

    pact_builder.interaction("get the status of a received submission", "", |mut i| {
        i.given("submission 9731234 exists with status RECEIVED");
        i.request
            .method("GET")
            .path("/repo/v1/evaluation/submission/9731234/status")
            .header("authorization", format!("Bearer {TEST_TOKEN}"));
        i.response
            .status(200)
            .header("content-type", "application/json")
            .json_body(submission_status(9_731_234, "RECEIVED", "etag-1"));
        i
    });

    pact_builder.interaction("store an ACCEPTED status for a submission", "", |mut i| {
        i.given("submission 9731234 exists with status RECEIVED");
        i.request
            .method("PUT")
            .path("/repo/v1/evaluation/submission/9731234/status")
            .header("authorization", format!("Bearer {TEST_TOKEN}"))
            .header("content-type", "application/json")
            .json_body(submission_status(9_731_234, "ACCEPTED", "etag-1"));
        i.response
            .status(200)
            .header("content-type", "application/json")
            .json_body(submission_status(9_731_234, "ACCEPTED", "etag-2"));
        i
    });

    let mock_server = pact_builder.start_mock_server(None, None);
    let store = store_for(mock_server.url().as_str());

    let finished = update_status(&store, &credentials(), 9_731_234, "VALIDATED")
        .await
        .expect("update should succeed");
    assert!(finished);
}

#[tokio::test]
async fn test_unrecognized_label_stores_invalid_contract() {
    init_rustls();
    let mut pact_builder = PactBuilder::new(CONSUMER, PROVIDER);
    authenticate_interaction(&mut pact_builder);

    pact_builder.interaction("get the status of a scored-pending submission", "", |mut i| {
        i.given("submission 9731235 exists with status EVALUATION_IN_PROGRESS");
        i.request
            .method("GET")
            .path("/repo/v1/evaluation/submission/9731235/status")
            .header("authorization", format!("Bearer {TEST_TOKEN}"));
        i.response
            .status(200)
            .header("content-type", "application/json")
            .json_body(submission_status(
                9_731_235,
                "EVALUATION_IN_PROGRESS",
                "etag-7",
            ));
        i
    });

    pact_builder.interaction("store an INVALID status for a submission", "", |mut i| {
        i.given("submission 9731235 exists with status EVALUATION_IN_PROGRESS");
        i.request
            .method("PUT")
            .path("/repo/v1/evaluation/submission/9731235/status")
            .header("authorization", format!("Bearer {TEST_TOKEN}"))
            .header("content-type", "application/json")
            .json_body(submission_status(9_731_235, "INVALID", "etag-7"));
        i.response
            .status(200)
            .header("content-type", "application/json")
            .json_body(submission_status(9_731_235, "INVALID", "etag-8"));
        i
    });

    let mock_server = pact_builder.start_mock_server(None, None);
    let store = store_for(mock_server.url().as_str());

    let finished = update_status(&store, &credentials(), 9_731_235, "garbage")
        .await
        .expect("unrecognized labels are not an error");
    assert!(finished);
}

#[tokio::test]
async fn test_missing_submission_fails_before_write_contract() {
    init_rustls();
    let mut pact_builder = PactBuilder::new(CONSUMER, PROVIDER);
    authenticate_interaction(&mut pact_builder);

    pact_builder.interaction("get the status of a submission that does not exist", "", |mut i| {
        i.given("submission 404404 does not exist");
        i.request
            .method("GET")
            .path("/repo/v1/evaluation/submission/404404/status")
            .header("authorization", format!("Bearer {TEST_TOKEN}"));
        i.response
            .status(404)
            .header("content-type", "application/json")
            .json_body(json!({
                "reason": "Submission 404404 does not exist"
            }));
        i
    });

    // No PUT interaction: a write would be an unexpected request
    let mock_server = pact_builder.start_mock_server(None, None);
    let store = store_for(mock_server.url().as_str());

    let err = update_status(&store, &credentials(), 404_404, "SCORED")
        .await
        .expect_err("missing submission must fail");
    let store_err = err
        .downcast_ref::<StoreError>()
        .expect("error should come from the store");
    assert!(store_err.is_not_found());
    assert!(store_err
        .to_string()
        .contains("Submission 404404 does not exist"));
}

#[tokio::test]
async fn test_rejected_token_contract() {
    init_rustls();
    let mut pact_builder = PactBuilder::new(CONSUMER, PROVIDER);

    pact_builder.interaction("fetch the caller's profile with a revoked token", "", |mut i| {
        i.given("the personal access token has been revoked");
        i.request
            .method("GET")
            .path("/repo/v1/userProfile")
            .header("authorization", "Bearer revoked-token");
        i.response
            .status(401)
            .header("content-type", "application/json")
            .json_body(json!({
                "reason": "Invalid access token"
            }));
        i
    });

    let mock_server = pact_builder.start_mock_server(None, None);
    let store = store_for(mock_server.url().as_str());

    let err = store
        .authenticate(&Credentials::from_token("revoked-token"))
        .await
        .expect_err("revoked token must be rejected");
    assert!(err.is_authentication());
    assert_eq!(
        err.to_string(),
        "authentication failed (HTTP 401): Invalid access token"
    );
}

#[tokio::test]
async fn test_concurrent_modification_contract() {
    init_rustls();
    let mut pact_builder = PactBuilder::new(CONSUMER, PROVIDER);
    authenticate_interaction(&mut pact_builder);

    pact_builder.interaction("get the status of a submission being modified elsewhere", "", |mut i| {
        i.given("submission 9731236 exists and is modified concurrently");
        i.request
            .method("GET")
            .path("/repo/v1/evaluation/submission/9731236/status")
            .header("authorization", format!("Bearer {TEST_TOKEN}"));
        i.response
            .status(200)
            .header("content-type", "application/json")
            .json_body(submission_status(9_731_236, "RECEIVED", "stale-etag"));
        i
    });

    pact_builder.interaction("store a status with a stale etag", "", |mut i| {
        i.given("submission 9731236 exists and is modified concurrently");
        i.request
            .method("PUT")
            .path("/repo/v1/evaluation/submission/9731236/status")
            .header("authorization", format!("Bearer {TEST_TOKEN}"))
            .json_body(submission_status(9_731_236, "ACCEPTED", "stale-etag"));
        i.response
            .status(412)
            .header("content-type", "application/json")
            .json_body(json!({
                "reason": "Submission Status has been updated since you last fetched it"
            }));
        i
    });

    let mock_server = pact_builder.start_mock_server(None, None);
    let store = store_for(mock_server.url().as_str());

    let err = update_status(&store, &credentials(), 9_731_236, "SCORED")
        .await
        .expect_err("stale etag must fail");
    assert!(matches!(
        err.downcast_ref::<StoreError>(),
        Some(StoreError::Conflict {
            submission_id: 9_731_236,
            ..
        })
    ));
}

#[tokio::test]
async fn test_rejected_write_passes_reason_through_contract() {
    init_rustls();
    let mut pact_builder = PactBuilder::new(CONSUMER, PROVIDER);
    authenticate_interaction(&mut pact_builder);

    pact_builder.interaction("get the status of a submission in a closed evaluation", "", |mut i| {
        i.given("submission 9731237 belongs to a closed evaluation");
        i.request
            .method("GET")
            .path("/repo/v1/evaluation/submission/9731237/status")
            .header("authorization", format!("Bearer {TEST_TOKEN}"));
        i.response
            .status(200)
            .header("content-type", "application/json")
            .json_body(submission_status(9_731_237, "RECEIVED", "etag-3"));
        i
    });

    pact_builder.interaction("store a status the service refuses", "", |mut i| {
        i.given("submission 9731237 belongs to a closed evaluation");
        i.request
            .method("PUT")
            .path("/repo/v1/evaluation/submission/9731237/status")
            .header("authorization", format!("Bearer {TEST_TOKEN}"))
            .json_body(submission_status(9_731_237, "INVALID", "etag-3"));
        i.response
            .status(500)
            .header("content-type", "application/json")
            .json_body(json!({
                "reason": "Evaluation queue is closed"
            }));
        i
    });

    let mock_server = pact_builder.start_mock_server(None, None);
    let store = store_for(mock_server.url().as_str());

    let err = update_status(&store, &credentials(), 9_731_237, "INVALID")
        .await
        .expect_err("refused write must fail");
    match err.downcast_ref::<StoreError>() {
        Some(StoreError::Store {
            submission_id,
            status,
            reason,
        }) => {
            assert_eq!(*submission_id, 9_731_237);
            assert_eq!(*status, 500);
            assert_eq!(reason, "Evaluation queue is closed");
        }
        other => panic!("expected StoreError::Store, got {other:?}"),
    }
}

#[tokio::test]
async fn test_token_rejected_on_fetch_contract() {
    init_rustls();
    let mut pact_builder = PactBuilder::new(CONSUMER, PROVIDER);
    authenticate_interaction(&mut pact_builder);

    pact_builder.interaction("get a submission status after the token expired", "", |mut i| {
        i.given("the personal access token expires after authentication");
        i.request
            .method("GET")
            .path("/repo/v1/evaluation/submission/9731238/status")
            .header("authorization", format!("Bearer {TEST_TOKEN}"));
        i.response
            .status(401)
            .header("content-type", "application/json")
            .json_body(json!({
                "reason": "Access token has expired"
            }));
        i
    });

    // No PUT interaction: a write would be an unexpected request
    let mock_server = pact_builder.start_mock_server(None, None);
    let store = store_for(mock_server.url().as_str());

    let err = update_status(&store, &credentials(), 9_731_238, "VALIDATED")
        .await
        .expect_err("expired token must fail");
    let store_err = err
        .downcast_ref::<StoreError>()
        .expect("error should come from the store");
    assert!(store_err.is_authentication());
    assert!(store_err.to_string().contains("Access token has expired"));
}

#[tokio::test]
async fn test_unreachable_service_reports_transport_failure() {
    init_rustls();
    // Port 1 on loopback refuses connections
    let store = store_for("http://127.0.0.1:1");

    let result = update_status(&store, &credentials(), 9_731_239, "SCORED").await;

    let err = result.expect_err("unreachable service must not report completion");
    assert!(matches!(
        err.downcast_ref::<StoreError>(),
        Some(StoreError::Transport {
            operation: "authenticate",
            ..
        })
    ));
}
