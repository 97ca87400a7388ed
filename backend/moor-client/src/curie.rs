//! CURIE handling: translation to MOO expressions and path-safe encoding.
//!
//! Object identifiers arrive as compact CURIEs (`oid:123`, `sysobj:room`,
//! `uuid:...`) or already in MOO expression form (`#7`, `$room`,
//! `match("...")`). Translation is pure string work; nothing here consults
//! the server.

use crate::error::moor_client::MoorClientError;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Characters left unescaped in object path segments. `:` and `.` appear in
/// CURIEs and must survive routing; the rest is the RFC 3986 unreserved set.
const CURIE_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b':')
    .remove(b'.')
    .remove(b'-')
    .remove(b'_')
    .remove(b'~');

const OID_PREFIX: &str = "oid:";
const SYSOBJ_PREFIX: &str = "sysobj:";
const UUID_PREFIX: &str = "uuid:";

/// Translate an object CURIE into a MOO expression.
///
/// Rules, first match wins:
/// 1. `#`, `$`, or `match("` prefix - already an expression, unchanged.
/// 2. `oid:<digits>` - `#<digits>`.
/// 3. `sysobj:<name>` - `$<name>`.
/// 4. `uuid:<token>` - `match("<full curie>")`, prefix included, so the
///    server resolves it by name lookup.
/// 5. Anything else is passed through unchanged.
///
/// Malformed `oid:`/`sysobj:` forms fall back to the original string rather
/// than failing; the server produces the authoritative error.
///
/// # Errors
///
/// Returns [`MoorClientError::InvalidIdentifier`] if the trimmed input is
/// empty.
pub fn to_expression(object_curie: &str) -> Result<String, MoorClientError> {
    let curie = object_curie.trim();
    if curie.is_empty() {
        return Err(MoorClientError::invalid_identifier(
            "object identifier must not be empty",
        ));
    }

    if curie.starts_with('#') || curie.starts_with('$') || curie.starts_with("match(\"") {
        return Ok(curie.to_string());
    }

    if let Some(digits) = curie.strip_prefix(OID_PREFIX) {
        return Ok(match digits.parse::<i64>() {
            Ok(number) => format!("#{number}"),
            Err(_) => curie.to_string(),
        });
    }

    if let Some(name) = curie.strip_prefix(SYSOBJ_PREFIX) {
        return Ok(if name.is_empty() {
            curie.to_string()
        } else {
            format!("${name}")
        });
    }

    if curie.starts_with(UUID_PREFIX) {
        return Ok(format!("match(\"{curie}\")"));
    }

    Ok(curie.to_string())
}

/// Percent-encode a trimmed CURIE for use as one URL path segment.
pub fn to_path_segment(object_curie: &str) -> String {
    utf8_percent_encode(object_curie.trim(), CURIE_SEGMENT).to_string()
}
