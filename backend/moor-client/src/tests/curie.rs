// Unit tests for CURIE translation and path-segment encoding

use crate::curie::{to_expression, to_path_segment};
use crate::error::moor_client::MoorClientError;

// ============================================
// UNIT TESTS: CURIE -> MOO expression
// ============================================

/// **VALUE**: Verifies every CURIE scheme maps to its MOO address form.
///
/// **WHY THIS MATTERS**: Every object operation goes through this
/// translation; a wrong mapping silently addresses the wrong object.
///
/// **BUG THIS CATCHES**: Scheme prefixes mapped to the wrong sigil, or the
/// uuid form losing its prefix inside `match()`.
#[test]
fn given_scheme_curies_when_to_expression_then_translates_each_scheme() {
    assert_eq!(to_expression("oid:123").unwrap(), "#123");
    assert_eq!(to_expression("sysobj:room").unwrap(), "$room");
    assert_eq!(
        to_expression("uuid:ab12").unwrap(),
        "match(\"uuid:ab12\")"
    );
}

/// **VALUE**: Verifies raw expression forms pass through untouched.
///
/// **WHY THIS MATTERS**: Callers are allowed to hand in `#n`, `$name`, or a
/// `match("...")` expression directly; re-translating them would corrupt the
/// address.
#[test]
fn given_raw_expression_forms_when_to_expression_then_returns_unchanged() {
    assert_eq!(to_expression("#7").unwrap(), "#7");
    assert_eq!(to_expression("$room").unwrap(), "$room");
    assert_eq!(
        to_expression("match(\"the door\")").unwrap(),
        "match(\"the door\")"
    );
}

/// **VALUE**: Verifies malformed scheme payloads fall back to passthrough
/// instead of failing.
///
/// **WHY THIS MATTERS**: Translation is deliberately permissive; the server
/// produces the authoritative error for a bad address. A hard failure here
/// would mask the server's richer diagnostics.
///
/// **BUG THIS CATCHES**: Turning the permissive fallback into an error, or
/// emitting a mangled `#`/`$` form from unparseable input.
#[test]
fn given_malformed_scheme_payloads_when_to_expression_then_passes_through() {
    assert_eq!(to_expression("oid:notanumber").unwrap(), "oid:notanumber");
    assert_eq!(to_expression("sysobj:").unwrap(), "sysobj:");
    assert_eq!(to_expression("some random name").unwrap(), "some random name");
}

#[test]
fn given_empty_identifier_when_to_expression_then_fails_invalid_identifier() {
    let error = to_expression("   ").unwrap_err();
    assert!(matches!(error, MoorClientError::InvalidIdentifier { .. }));
}

#[test]
fn given_padded_identifier_when_to_expression_then_trims_before_matching() {
    assert_eq!(to_expression("  oid:5  ").unwrap(), "#5");
}

// ============================================
// UNIT TESTS: CURIE -> URL path segment
// ============================================

/// **VALUE**: Verifies `:` and `.` survive path encoding while reserved
/// characters are escaped.
///
/// **WHY THIS MATTERS**: The server routes `/properties/{obj}` by the raw
/// CURIE; escaping the scheme colon would change the address, while leaving
/// `#` unescaped would truncate the URL at the fragment.
#[test]
fn given_curies_when_to_path_segment_then_keeps_scheme_chars_and_escapes_reserved() {
    assert_eq!(to_path_segment("oid:123"), "oid:123");
    assert_eq!(to_path_segment("sysobj:room.exit"), "sysobj:room.exit");
    assert_eq!(to_path_segment("#7"), "%237");
    assert_eq!(to_path_segment("$room"), "%24room");
    assert_eq!(to_path_segment("a name"), "a%20name");
}

#[test]
fn given_padded_curie_when_to_path_segment_then_trims_first() {
    assert_eq!(to_path_segment("  oid:9 "), "oid:9");
}
