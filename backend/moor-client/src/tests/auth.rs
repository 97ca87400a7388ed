// Unit tests for the auth session state machine

use crate::auth::AuthSession;

use common::RedactedSecret;

fn authenticated_session() -> AuthSession {
    let mut session = AuthSession::default();
    session.authenticated(
        String::from("wizard"),
        String::from("hunter2"),
        String::from("token-1"),
    );
    session
}

#[test]
fn given_new_session_when_inspected_then_has_no_token_or_credentials() {
    let session = AuthSession::default();
    assert_eq!(session.token(), None);
    assert!(!session.has_credentials());
}

/// **VALUE**: Verifies a successful connect persists both the token and the
/// credentials that produced it.
///
/// **WHY THIS MATTERS**: The automatic refresh reuses whatever credentials
/// last connected successfully; if they are not persisted, the first token
/// expiry turns into a hard failure.
#[test]
fn given_successful_connect_when_authenticated_then_stores_token_and_defaults() {
    let session = authenticated_session();
    assert_eq!(session.token(), Some("token-1"));
    assert!(session.has_credentials());
}

/// **VALUE**: Verifies invalidation clears the token but keeps credentials.
///
/// **WHY THIS MATTERS**: This is the transition the 401-retry depends on - a
/// refresh is only possible because invalidate leaves the defaults in place.
///
/// **BUG THIS CATCHES**: Invalidate wiping credentials, which would downgrade
/// every token expiry into an AuthenticationRequired error.
#[test]
fn given_authenticated_session_when_invalidate_then_keeps_credentials() {
    let mut session = authenticated_session();
    session.invalidate();
    assert_eq!(session.token(), None);
    assert!(session.has_credentials());
}

#[test]
fn given_authenticated_session_when_disconnect_then_clears_token_only() {
    let mut session = authenticated_session();
    session.disconnect(false);
    assert_eq!(session.token(), None);
    assert!(session.has_credentials());
}

#[test]
fn given_authenticated_session_when_disconnect_with_clear_then_clears_everything() {
    let mut session = authenticated_session();
    session.disconnect(true);
    assert_eq!(session.token(), None);
    assert!(!session.has_credentials());
}

#[test]
fn given_explicit_credentials_when_resolve_then_they_win_over_defaults() {
    let session = authenticated_session();
    let (player, password) = session
        .resolve_credentials(Some("guest"), Some("swordfish"))
        .unwrap();
    assert_eq!(player, "guest");
    assert_eq!(password, "swordfish");
}

#[test]
fn given_partial_credentials_when_resolve_then_defaults_fill_the_gaps() {
    let session = authenticated_session();
    let (player, password) = session.resolve_credentials(Some("guest"), None).unwrap();
    assert_eq!(player, "guest");
    assert_eq!(password, "hunter2");
}

#[test]
fn given_no_credentials_anywhere_when_resolve_then_returns_none() {
    let session = AuthSession::default();
    assert_eq!(session.resolve_credentials(None, None), None);

    let partial = AuthSession::new(Some(String::from("wizard")), None);
    assert_eq!(partial.resolve_credentials(None, None), None);
}

#[test]
fn given_seeded_session_when_constructed_then_reports_credentials() {
    let session = AuthSession::new(
        Some(String::from("wizard")),
        Some(RedactedSecret::new(String::from("hunter2"))),
    );
    assert!(session.has_credentials());
    assert_eq!(session.token(), None);
}
