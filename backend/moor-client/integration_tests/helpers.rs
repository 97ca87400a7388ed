//! Shared fixtures for the REST client tests: a mock mooR server plus
//! clients in the two interesting auth states.

use std::time::Duration;

use common::RedactedSecret;
use moor_client::{AuthSession, MOOR_AUTH_TOKEN_HEADER, MoorClient};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_PLAYER: &str = "wizard";
pub const TEST_PASSWORD: &str = "hunter2";
pub const TEST_TOKEN: &str = "token-alpha";

const TEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Mount a connect endpoint that accepts anything and returns `token`.
pub async fn mount_connect(server: &MockServer, token: &str) {
    Mock::given(method("POST"))
        .and(path("/auth/connect"))
        .respond_with(ResponseTemplate::new(200).insert_header(MOOR_AUTH_TOKEN_HEADER, token))
        .mount(server)
        .await;
}

/// A client seeded with default credentials, pointed at the mock server.
pub fn client_with_credentials(server: &MockServer) -> MoorClient {
    MoorClient::with_session(
        &server.uri(),
        TEST_TIMEOUT,
        AuthSession::new(
            Some(String::from(TEST_PLAYER)),
            Some(RedactedSecret::new(String::from(TEST_PASSWORD))),
        ),
    )
    .expect("client should build against the mock server URI")
}

/// A client with no credentials at all.
pub fn client_without_credentials(server: &MockServer) -> MoorClient {
    MoorClient::new(&server.uri()).expect("client should build against the mock server URI")
}
