//! Token lifecycle tests: connect outcomes, the single refresh-and-retry,
//! and disconnect semantics.

use crate::helpers::{
    TEST_TOKEN, client_with_credentials, client_without_credentials, mount_connect,
};

use moor_client::MOOR_AUTH_TOKEN_HEADER;
use moor_client::error::MoorClientError;

use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: Verifies the happy path: connect stores the returned token and
/// reports it to the caller.
///
/// **WHY THIS MATTERS**: Every authenticated operation rides on this token;
/// if connect succeeds without persisting it, every follow-up call
/// re-authenticates or fails.
#[tokio::test]
async fn given_valid_credentials_when_connect_then_token_is_stored() {
    // GIVEN: a server that issues a token
    let server = MockServer::start().await;
    mount_connect(&server, TEST_TOKEN).await;
    let client = client_with_credentials(&server);

    // WHEN: connecting with the stored defaults
    let token = client.connect(None, None).await.expect("connect should succeed");

    // THEN: the token is returned and retained
    assert_eq!(token, TEST_TOKEN);
    assert_eq!(client.token().await.as_deref(), Some(TEST_TOKEN));
}

/// Connect forwards the credentials as form fields.
#[tokio::test]
async fn given_explicit_credentials_when_connect_then_form_body_carries_them() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/connect"))
        .and(body_string_contains("player=guest"))
        .and(body_string_contains("password=swordfish"))
        .respond_with(ResponseTemplate::new(200).insert_header(MOOR_AUTH_TOKEN_HEADER, TEST_TOKEN))
        .expect(1)
        .mount(&server)
        .await;
    let client = client_without_credentials(&server);

    let token = client
        .connect(Some("guest"), Some("swordfish"))
        .await
        .expect("connect should succeed");

    assert_eq!(token, TEST_TOKEN);
}

#[tokio::test]
async fn given_rejected_credentials_when_connect_then_fails_invalid_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/connect"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "bad password"})))
        .mount(&server)
        .await;
    let client = client_with_credentials(&server);

    let error = client.connect(None, None).await.unwrap_err();

    assert!(matches!(error, MoorClientError::InvalidCredentials { .. }));
    assert_eq!(error.status_code(), Some(401));
    assert!(error.resolution().is_some());
}

#[tokio::test]
async fn given_server_failure_when_connect_then_fails_auth_failed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/connect"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    let client = client_with_credentials(&server);

    let error = client.connect(None, None).await.unwrap_err();

    assert!(matches!(error, MoorClientError::AuthFailed { .. }));
    assert_eq!(error.status_code(), Some(503));
}

/// **VALUE**: Verifies a 2xx connect without the token header is treated as
/// a protocol violation, not a success.
///
/// **WHY THIS MATTERS**: Accepting a headerless 200 would leave the session
/// "authenticated" with no token, and every later request would 401 in a
/// refresh loop that can never succeed.
#[tokio::test]
async fn given_missing_token_header_when_connect_then_fails_auth_protocol() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/connect"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    let client = client_with_credentials(&server);

    let error = client.connect(None, None).await.unwrap_err();

    assert!(matches!(error, MoorClientError::AuthProtocolError { .. }));
    assert_eq!(client.token().await, None);
}

#[tokio::test]
async fn given_no_credentials_anywhere_when_operation_then_fails_before_any_request() {
    let server = MockServer::start().await;
    let client = client_without_credentials(&server);

    let error = client.eval_expr("1 + 1").await.unwrap_err();

    assert!(matches!(
        error,
        MoorClientError::AuthenticationRequired { .. }
    ));
    // The server never saw a request
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

/// **VALUE**: Verifies the single refresh-and-retry: a 401 mid-session
/// triggers one reconnect and the retried request carries the fresh token.
///
/// **WHY THIS MATTERS**: Tokens expire server-side at unpredictable times;
/// without this recovery every long-lived automation session dies on the
/// first expiry.
///
/// **BUG THIS CATCHES**: Retrying with the stale token, skipping the
/// refresh, or failing to persist the refreshed token afterwards.
#[tokio::test]
async fn given_expired_token_when_request_then_refreshes_and_retries_once() {
    let server = MockServer::start().await;

    // GIVEN: connect hands out token-1 first, token-2 afterwards
    Mock::given(method("POST"))
        .and(path("/auth/connect"))
        .respond_with(ResponseTemplate::new(200).insert_header(MOOR_AUTH_TOKEN_HEADER, "token-1"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/connect"))
        .respond_with(ResponseTemplate::new(200).insert_header(MOOR_AUTH_TOKEN_HEADER, "token-2"))
        .expect(1)
        .mount(&server)
        .await;

    // GIVEN: the first token is already expired, the second one works
    Mock::given(method("POST"))
        .and(path("/eval"))
        .and(header(MOOR_AUTH_TOKEN_HEADER, "token-1"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/eval"))
        .and(header(MOOR_AUTH_TOKEN_HEADER, "token-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(2)))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_with_credentials(&server);

    // WHEN: evaluating across the expiry
    let result = client.eval_expr("1 + 1").await.expect("retry should succeed");

    // THEN: the call succeeded and the session holds the refreshed token
    assert_eq!(result, Some(json!(2)));
    assert_eq!(client.token().await.as_deref(), Some("token-2"));
}

/// **VALUE**: Verifies a second 401 is terminal: the request is attempted
/// exactly twice and surfaces as TokenExpired.
///
/// **BUG THIS CATCHES**: An unbounded refresh loop against a server that
/// keeps rejecting tokens.
#[tokio::test]
async fn given_persistent_401_when_request_then_fails_token_expired_after_two_attempts() {
    let server = MockServer::start().await;
    mount_connect(&server, TEST_TOKEN).await;
    Mock::given(method("POST"))
        .and(path("/eval"))
        .respond_with(ResponseTemplate::new(401))
        .expect(2)
        .mount(&server)
        .await;
    let client = client_with_credentials(&server);

    let error = client.eval_expr("1 + 1").await.unwrap_err();

    assert!(matches!(error, MoorClientError::TokenExpired { .. }));
    assert_eq!(error.status_code(), Some(401));
    assert!(error.resolution().is_some());
    // MockServer verifies expect(2) on drop: no third attempt happened.
}

#[tokio::test]
async fn given_disconnect_keeping_defaults_when_next_operation_then_reconnects() {
    let server = MockServer::start().await;
    mount_connect(&server, TEST_TOKEN).await;
    Mock::given(method("POST"))
        .and(path("/eval"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(1)))
        .mount(&server)
        .await;
    let client = client_with_credentials(&server);

    client.connect(None, None).await.expect("connect should succeed");
    client.disconnect(false).await;
    assert_eq!(client.token().await, None);

    // Credentials survived, so the next call re-authenticates implicitly
    let result = client.eval_expr("1").await.expect("implicit reconnect");
    assert_eq!(result, Some(json!(1)));
}

#[tokio::test]
async fn given_disconnect_clearing_defaults_when_next_operation_then_authentication_required() {
    let server = MockServer::start().await;
    mount_connect(&server, TEST_TOKEN).await;
    let client = client_with_credentials(&server);

    client.connect(None, None).await.expect("connect should succeed");
    client.disconnect(true).await;

    let error = client.eval_expr("1").await.unwrap_err();
    assert!(matches!(
        error,
        MoorClientError::AuthenticationRequired { .. }
    ));
}

/// Credentials used for an explicit connect become the defaults the next
/// refresh uses.
#[tokio::test]
async fn given_one_off_credentials_when_connect_succeeds_then_they_become_defaults() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/connect"))
        .and(body_string_contains("player=guest"))
        .respond_with(ResponseTemplate::new(200).insert_header(MOOR_AUTH_TOKEN_HEADER, "token-1"))
        .expect(2)
        .mount(&server)
        .await;
    let client = client_without_credentials(&server);

    client
        .connect(Some("guest"), Some("swordfish"))
        .await
        .expect("connect should succeed");
    client.disconnect(false).await;

    // The refresh connects as "guest" again without new input
    client.connect(None, None).await.expect("refresh with persisted defaults");
}
