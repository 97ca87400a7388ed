// Unit tests for MOO literal encoding and object-reference extraction

use crate::literal::{extract_obj_curie, to_moo_literal};

use serde_json::{Value, json};

// ============================================
// UNIT TESTS: JSON -> MOO literal
// ============================================

/// **VALUE**: Verifies the scalar encoding table: null, booleans, numbers.
///
/// **WHY THIS MATTERS**: MOO has no boolean or null types; both collapse
/// onto integers. Getting `null -> 0` or `true -> 1` wrong corrupts every
/// property assignment that carries flags or optional values.
#[test]
fn given_scalars_when_to_moo_literal_then_uses_integer_forms() {
    assert_eq!(to_moo_literal(&Value::Null), "0");
    assert_eq!(to_moo_literal(&json!(true)), "1");
    assert_eq!(to_moo_literal(&json!(false)), "0");
    assert_eq!(to_moo_literal(&json!(42)), "42");
    assert_eq!(to_moo_literal(&json!(-3)), "-3");
    assert_eq!(to_moo_literal(&json!(1.5)), "1.5");
}

/// **VALUE**: Verifies string escaping covers both backslash and quote.
///
/// **WHY THIS MATTERS**: Literals are spliced into eval programs as text; an
/// unescaped quote terminates the MOO string early and the rest of the value
/// executes as code.
///
/// **BUG THIS CATCHES**: Escaping quote but not backslash (or vice versa),
/// or escaping in the wrong order so `\` doubles twice.
#[test]
fn given_strings_when_to_moo_literal_then_escapes_backslash_and_quote() {
    assert_eq!(to_moo_literal(&json!("hello")), "\"hello\"");
    assert_eq!(to_moo_literal(&json!("a\"b\\c")), "\"a\\\"b\\\\c\"");
    assert_eq!(to_moo_literal(&json!("")), "\"\"");
}

#[test]
fn given_lists_when_to_moo_literal_then_spaces_elements_and_collapses_empty() {
    assert_eq!(to_moo_literal(&json!([1, 2, 3])), "{ 1, 2, 3 }");
    assert_eq!(to_moo_literal(&json!([])), "{}");
}

/// **VALUE**: Verifies mappings encode as pair lists in insertion order.
///
/// **WHY THIS MATTERS**: Property maps drive `create_object`'s assignment
/// program; reordering keys changes the observable assignment order on the
/// server.
#[test]
fn given_mappings_when_to_moo_literal_then_encodes_ordered_pairs() {
    assert_eq!(to_moo_literal(&json!({"x": 1})), "{ {\"x\", 1} }");
    assert_eq!(
        to_moo_literal(&json!({"b": 1, "a": 2})),
        "{ {\"b\", 1}, {\"a\", 2} }"
    );
    assert_eq!(to_moo_literal(&json!({})), "{}");
}

#[test]
fn given_nested_values_when_to_moo_literal_then_recurses() {
    let value = json!({"name": "thing", "tags": ["a", "b"], "meta": {"deep": [true, null]}});
    assert_eq!(
        to_moo_literal(&value),
        "{ {\"name\", \"thing\"}, {\"tags\", { \"a\", \"b\" }}, {\"meta\", { {\"deep\", { 1, 0 }} }} }"
    );
}

// ============================================
// UNIT TESTS: object-reference extraction
// ============================================

/// **VALUE**: Verifies both payload shapes the property endpoint produces.
///
/// **WHY THIS MATTERS**: The canonical shape nests the reference under
/// `value.obj`; older shapes put `obj` at the top level. Automation that
/// follows object-valued properties breaks if either shape stops resolving.
#[test]
fn given_both_payload_shapes_when_extract_obj_curie_then_returns_curie() {
    assert_eq!(extract_obj_curie(&json!({"obj": "oid:5"})), Some("oid:5"));
    assert_eq!(
        extract_obj_curie(&json!({"value": {"obj": "oid:5"}})),
        Some("oid:5")
    );
}

#[test]
fn given_non_reference_payloads_when_extract_obj_curie_then_returns_none() {
    assert_eq!(extract_obj_curie(&json!({"value": 0})), None);
    assert_eq!(extract_obj_curie(&json!({"obj": 7})), None);
    assert_eq!(extract_obj_curie(&json!("oid:5")), None);
    assert_eq!(extract_obj_curie(&json!(null)), None);
    assert_eq!(extract_obj_curie(&json!({"value": {"obj": 3}})), None);
}

/// Top-level `obj` wins over the nested form when both are present.
#[test]
fn given_both_shapes_at_once_when_extract_obj_curie_then_top_level_wins() {
    let payload = json!({"obj": "oid:1", "value": {"obj": "oid:2"}});
    assert_eq!(extract_obj_curie(&payload), Some("oid:1"));
}
