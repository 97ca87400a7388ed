//! Encoding JSON values into mooR's textual literal syntax.
//!
//! Encoding is total and one-directional: the client writes literals into
//! eval programs, responses come back as ordinary JSON. MOO has no boolean
//! or null types; both map onto integers. Mappings encode as lists of
//! `{key, value}` pair lists, in insertion order.

use serde_json::Value;

/// Double-quote a string for MOO, escaping backslashes and quotes.
pub fn escape_moo_string(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len() + 2);
    escaped.push('"');
    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            other => escaped.push(other),
        }
    }
    escaped.push('"');
    escaped
}

/// Encode a JSON value as a MOO literal.
///
/// Recursion depth follows the input; payloads are acyclic JSON so no cycle
/// guard is needed.
pub fn to_moo_literal(value: &Value) -> String {
    match value {
        Value::Null => String::from("0"),
        Value::Bool(true) => String::from("1"),
        Value::Bool(false) => String::from("0"),
        Value::Number(number) => number.to_string(),
        Value::String(text) => escape_moo_string(text),
        Value::Array(items) => {
            if items.is_empty() {
                return String::from("{}");
            }
            let elements = items
                .iter()
                .map(to_moo_literal)
                .collect::<Vec<_>>()
                .join(", ");
            format!("{{ {elements} }}")
        }
        Value::Object(entries) => {
            if entries.is_empty() {
                return String::from("{}");
            }
            let pairs = entries
                .iter()
                .map(|(key, item)| {
                    format!("{{{}, {}}}", escape_moo_string(key), to_moo_literal(item))
                })
                .collect::<Vec<_>>()
                .join(", ");
            format!("{{ {pairs} }}")
        }
    }
}

/// Extract an object CURIE from a property-fetch payload.
///
/// `/properties/{object}/{name}` returns property metadata with a `value`
/// key holding the serialized MOO value; object references arrive as
/// `{"value": {"obj": "oid:123"}}`. Some older payload shapes put `obj` at
/// the top level. Both shapes are accepted; anything else is `None`.
pub fn extract_obj_curie(payload: &Value) -> Option<&str> {
    let entries = payload.as_object()?;

    if let Some(curie) = entries.get("obj").and_then(Value::as_str) {
        return Some(curie);
    }

    entries.get("value")?.as_object()?.get("obj")?.as_str()
}
