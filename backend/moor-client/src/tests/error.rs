// Unit tests for the error taxonomy accessors
// Callers branch on these (retry? re-auth? abort?), so they are contract

use crate::error::moor_client::MoorClientError;

use serde_json::json;

/// **VALUE**: Verifies every auth-family error carries a resolution hint.
///
/// **WHY THIS MATTERS**: Agent-facing callers surface these hints verbatim;
/// an auth error without one leaves the caller guessing whether to retry,
/// re-authenticate, or abort.
#[test]
fn given_auth_family_errors_when_resolution_then_hint_is_present() {
    let rejected = MoorClientError::token_rejected(401, None);
    let expired = MoorClientError::token_expired("eval_expr", 401, None);
    let bad_creds = MoorClientError::invalid_credentials(401, None);

    assert!(rejected.resolution().is_some());
    assert!(expired.resolution().is_some());
    assert!(bad_creds.resolution().is_some());
    assert!(
        MoorClientError::invalid_argument("x").resolution().is_none(),
        "non-auth errors carry no hint"
    );
}

#[test]
fn given_status_bearing_errors_when_status_code_then_reports_it() {
    assert_eq!(
        MoorClientError::request_failed("get_property", 404, None).status_code(),
        Some(404)
    );
    assert_eq!(MoorClientError::auth_failed(503, None).status_code(), Some(503));
    assert_eq!(
        MoorClientError::auth_protocol("no header").status_code(),
        None
    );
}

#[test]
fn given_errors_when_categorized_then_labels_are_stable() {
    assert_eq!(
        MoorClientError::request_failed("op", 404, None).error_category(),
        "client_error"
    );
    assert_eq!(
        MoorClientError::request_failed("op", 502, None).error_category(),
        "server_error"
    );
    assert_eq!(
        MoorClientError::token_expired("op", 401, None).error_category(),
        "token_expired"
    );
    assert_eq!(
        MoorClientError::moo_reported("op", json!(["boom"])).error_category(),
        "moo_reported"
    );
}

#[test]
fn given_moo_reported_error_when_details_then_payload_is_preserved() {
    let error = MoorClientError::moo_reported("eval_expr", json!(["E_DIV (division by zero)"]));
    assert_eq!(error.details(), Some(&json!(["E_DIV (division by zero)"])));
}
