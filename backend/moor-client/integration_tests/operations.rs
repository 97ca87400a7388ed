//! Object operation tests: program assembly, path encoding, absent-status
//! handling, and in-band error detection.

use crate::helpers::{TEST_TOKEN, client_with_credentials, mount_connect};

use moor_client::VerbArgs;
use moor_client::error::MoorClientError;

use serde_json::{Value, json};
use wiremock::matchers::{
    body_json, body_string, body_string_contains, header, method, path, query_param,
};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

async fn server_with_connect() -> MockServer {
    let server = MockServer::start().await;
    mount_connect(&server, TEST_TOKEN).await;
    server
}

// ============================================
// Eval
// ============================================

/// **VALUE**: Verifies single-line expressions are normalized to a complete
/// `return ...;` program and shipped as plain text.
///
/// **WHY THIS MATTERS**: The eval endpoint executes whatever it receives; a
/// bare expression evaluates and discards its value, so without the rewrite
/// every one-line eval would answer 0.
#[tokio::test]
async fn given_single_line_expression_when_eval_then_normalizes_to_return_statement() {
    let server = server_with_connect().await;
    Mock::given(method("POST"))
        .and(path("/eval"))
        .and(header("content-type", TEXT_PLAIN))
        .and(body_string("return 1 + 1;"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(2)))
        .expect(1)
        .mount(&server)
        .await;
    let client = client_with_credentials(&server);

    let result = client.eval_expr("1 + 1").await.expect("eval should succeed");

    assert_eq!(result, Some(json!(2)));
}

#[tokio::test]
async fn given_multi_line_program_when_eval_then_passes_through_unchanged() {
    let server = server_with_connect().await;
    Mock::given(method("POST"))
        .and(path("/eval"))
        .and(body_string("x = 1;\nreturn x;"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(1)))
        .expect(1)
        .mount(&server)
        .await;
    let client = client_with_credentials(&server);

    client
        .eval_expr("x = 1;\nreturn x;")
        .await
        .expect("eval should succeed");
}

#[tokio::test]
async fn given_expression_with_return_when_eval_then_only_terminates_it() {
    let server = server_with_connect().await;
    Mock::given(method("POST"))
        .and(path("/eval"))
        .and(body_string("return 5;"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(5)))
        .expect(1)
        .mount(&server)
        .await;
    let client = client_with_credentials(&server);

    client.eval_expr("return 5").await.expect("eval should succeed");
}

#[tokio::test]
async fn given_blank_expression_when_eval_then_fails_invalid_argument() {
    let server = server_with_connect().await;
    let client = client_with_credentials(&server);

    let error = client.eval_expr("   ").await.unwrap_err();

    assert!(matches!(error, MoorClientError::InvalidArgument { .. }));
}

/// **VALUE**: Verifies in-band faults inside a 200 payload fail the call.
///
/// **WHY THIS MATTERS**: The eval endpoint always answers 200 and reports
/// in-language faults in the body; treating those as success would hand
/// callers an error description as if it were their result.
#[tokio::test]
async fn given_errors_list_in_payload_when_eval_then_fails_moo_reported() {
    let server = server_with_connect().await;
    Mock::given(method("POST"))
        .and(path("/eval"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"errors": ["boom"]})))
        .mount(&server)
        .await;
    let client = client_with_credentials(&server);

    let error = client.eval_expr("1").await.unwrap_err();

    assert!(matches!(error, MoorClientError::MooReported { .. }));
    assert_eq!(error.details(), Some(&json!(["boom"])));
}

#[tokio::test]
async fn given_error_msg_field_in_payload_when_eval_then_fails_moo_reported() {
    let server = server_with_connect().await;
    Mock::given(method("POST"))
        .and(path("/eval"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"error_msg": "E_PERM (no access)"})),
        )
        .mount(&server)
        .await;
    let client = client_with_credentials(&server);

    let error = client.eval_expr("1").await.unwrap_err();

    assert!(matches!(error, MoorClientError::MooReported { .. }));
}

#[tokio::test]
async fn given_empty_errors_list_when_eval_then_payload_passes_through() {
    let server = server_with_connect().await;
    Mock::given(method("POST"))
        .and(path("/eval"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"errors": [], "value": 7})))
        .mount(&server)
        .await;
    let client = client_with_credentials(&server);

    let result = client.eval_expr("1").await.expect("benign payload");

    assert_eq!(result, Some(json!({"errors": [], "value": 7})));
}

#[tokio::test]
async fn given_non_json_success_body_when_eval_then_returns_raw_text() {
    let server = server_with_connect().await;
    Mock::given(method("POST"))
        .and(path("/eval"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .mount(&server)
        .await;
    let client = client_with_credentials(&server);

    let result = client.eval_expr("1").await.expect("eval should succeed");

    assert_eq!(result, Some(Value::String(String::from("not json at all"))));
}

// ============================================
// Program assembly
// ============================================

/// **VALUE**: Verifies the create program assigns properties in insertion
/// order after the create call.
///
/// **BUG THIS CATCHES**: Property maps round-tripping through an unordered
/// container, which would scramble the observable assignment order.
#[tokio::test]
async fn given_properties_when_create_object_then_program_assigns_in_order() {
    let server = server_with_connect().await;
    let expected = "obj = create(#1, #2);\nobj.name = \"thing\";\nobj.size = 3;\nreturn obj;";
    Mock::given(method("POST"))
        .and(path("/eval"))
        .and(body_string(expected))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"obj": "oid:9"})))
        .expect(1)
        .mount(&server)
        .await;
    let client = client_with_credentials(&server);

    let properties = json!({"name": "thing", "size": 3});
    let result = client
        .create_object("oid:1", "oid:2", properties.as_object())
        .await
        .expect("create should succeed");

    assert_eq!(result, Some(json!({"obj": "oid:9"})));
}

#[tokio::test]
async fn given_set_property_when_called_then_program_assigns_and_returns() {
    let server = server_with_connect().await;
    let expected = "$room.name = \"lobby\";\nreturn $room.name;";
    Mock::given(method("POST"))
        .and(path("/eval"))
        .and(body_string(expected))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!("lobby")))
        .expect(1)
        .mount(&server)
        .await;
    let client = client_with_credentials(&server);

    client
        .set_property("sysobj:room", "name", &json!("lobby"))
        .await
        .expect("set_property should succeed");
}

#[tokio::test]
async fn given_move_object_when_called_then_program_moves_and_returns_object() {
    let server = server_with_connect().await;
    Mock::given(method("POST"))
        .and(path("/eval"))
        .and(body_string("move(#7, $room);\nreturn #7;"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"obj": "oid:7"})))
        .expect(1)
        .mount(&server)
        .await;
    let client = client_with_credentials(&server);

    client
        .move_object("oid:7", "sysobj:room")
        .await
        .expect("move should succeed");
}

#[tokio::test]
async fn given_recycle_object_when_called_then_program_recycles() {
    let server = server_with_connect().await;
    Mock::given(method("POST"))
        .and(path("/eval"))
        .and(body_string("recycle(#7);\nreturn 1;"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(1)))
        .expect(1)
        .mount(&server)
        .await;
    let client = client_with_credentials(&server);

    client.recycle_object("oid:7").await.expect("recycle should succeed");
}

// ============================================
// Properties and verbs
// ============================================

/// Path segments keep `:` and `.` but escape characters that would break
/// routing, `#` in particular.
#[tokio::test]
async fn given_hash_address_when_list_properties_then_path_is_escaped() {
    let server = server_with_connect().await;
    Mock::given(method("GET"))
        .and(path("/properties/%237"))
        .and(query_param("inherited", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["name"])))
        .expect(1)
        .mount(&server)
        .await;
    let client = client_with_credentials(&server);

    let result = client
        .list_properties("#7", false)
        .await
        .expect("list should succeed");

    assert_eq!(result, Some(json!(["name"])));
}

#[tokio::test]
async fn given_curie_address_when_list_verbs_then_colon_survives_routing() {
    let server = server_with_connect().await;
    Mock::given(method("GET"))
        .and(path("/verbs/oid:7"))
        .and(query_param("inherited", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;
    let client = client_with_credentials(&server);

    client.list_verbs("oid:7", true).await.expect("list should succeed");
}

#[tokio::test]
async fn given_missing_property_when_get_property_then_404_is_an_error() {
    let server = server_with_connect().await;
    Mock::given(method("GET"))
        .and(path("/properties/oid:7/ghost"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "no such prop"})))
        .mount(&server)
        .await;
    let client = client_with_credentials(&server);

    let error = client.get_property("oid:7", "ghost").await.unwrap_err();

    assert!(matches!(error, MoorClientError::RequestFailed { .. }));
    assert_eq!(error.status_code(), Some(404));
    assert_eq!(error.details(), Some(&json!({"error": "no such prop"})));
}

#[tokio::test]
async fn given_missing_verb_when_get_verb_then_returns_absent() {
    let server = server_with_connect().await;
    Mock::given(method("GET"))
        .and(path("/verbs/oid:7/greet"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let client = client_with_credentials(&server);

    let result = client.get_verb("oid:7", "greet").await.expect("absent, not error");

    assert_eq!(result, None);
}

#[tokio::test]
async fn given_verb_source_when_program_verb_then_posts_plain_text() {
    let server = server_with_connect().await;
    Mock::given(method("POST"))
        .and(path("/verbs/oid:7/greet"))
        .and(header("content-type", TEXT_PLAIN))
        .and(body_string("player:tell(\"hi\");"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;
    let client = client_with_credentials(&server);

    client
        .program_verb("oid:7", "greet", "player:tell(\"hi\");")
        .await
        .expect("program should succeed");
}

#[tokio::test]
async fn given_arguments_when_invoke_verb_then_posts_json_array() {
    let server = server_with_connect().await;
    Mock::given(method("POST"))
        .and(path("/verbs/oid:7/greet/invoke"))
        .and(body_json(json!([1, "a"])))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!("hi")))
        .expect(1)
        .mount(&server)
        .await;
    let client = client_with_credentials(&server);

    let result = client
        .invoke_verb("oid:7", "greet", Some(vec![json!(1), json!("a")]))
        .await
        .expect("invoke should succeed");

    assert_eq!(result, Some(json!("hi")));
}

// ============================================
// ensure_verb idempotency
// ============================================

/// **VALUE**: Verifies the idempotency contract: first call creates, second
/// call observes the verb and issues no creation program.
///
/// **WHY THIS MATTERS**: Setup automation runs ensure_verb on every boot;
/// re-creating an existing verb would duplicate it or clobber its source.
#[tokio::test]
async fn given_two_ensure_verb_calls_when_verb_appears_then_creation_runs_once() {
    let server = server_with_connect().await;

    // GIVEN: the existence check misses once, then finds the verb
    Mock::given(method("GET"))
        .and(path("/verbs/%237/greet"))
        .respond_with(ResponseTemplate::new(404))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/verbs/%237/greet"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "greet"})))
        .expect(1)
        .mount(&server)
        .await;

    // GIVEN: the creation program is accepted
    let expected_program = "try\n  add_verb(#7, {player, \"rxd\", \"greet\"}, \
                            {\"this\", \"none\", \"none\"});\nexcept error (ANY)\n  0;\nendtry;\nreturn 1;";
    Mock::given(method("POST"))
        .and(path("/eval"))
        .and(body_string(expected_program))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(1)))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_with_credentials(&server);

    // WHEN: ensuring the verb twice
    client
        .ensure_verb("#7", "greet", "player", "rxd", None)
        .await
        .expect("first ensure should create");
    client
        .ensure_verb("#7", "greet", "player", "rxd", None)
        .await
        .expect("second ensure should no-op");

    // THEN: expect(1) on the eval mock verifies a single creation on drop
}

#[tokio::test]
async fn given_faulting_existence_check_when_ensure_verb_then_500_counts_as_missing() {
    let server = server_with_connect().await;
    Mock::given(method("GET"))
        .and(path("/verbs/%237/greet"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/eval"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(1)))
        .expect(1)
        .mount(&server)
        .await;
    let client = client_with_credentials(&server);

    client
        .ensure_verb("#7", "greet", "player", "rxd", None)
        .await
        .expect("500 probe should fall through to creation");
}

#[tokio::test]
async fn given_forbidden_existence_check_when_ensure_verb_then_error_propagates() {
    let server = server_with_connect().await;
    Mock::given(method("GET"))
        .and(path("/verbs/%237/greet"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/eval"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let client = client_with_credentials(&server);

    let error = client
        .ensure_verb("#7", "greet", "player", "rxd", None)
        .await
        .unwrap_err();

    assert!(matches!(error, MoorClientError::RequestFailed { .. }));
    assert_eq!(error.status_code(), Some(403));
}

#[tokio::test]
async fn given_custom_args_when_ensure_verb_then_program_carries_them() {
    let server = server_with_connect().await;
    Mock::given(method("GET"))
        .and(path("/verbs/%237/put"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let expected_program = "try\n  add_verb(#7, {player, \"rxd\", \"put\"}, \
                            {\"any\", \"in\", \"this\"});\nexcept error (ANY)\n  0;\nendtry;\nreturn 1;";
    Mock::given(method("POST"))
        .and(path("/eval"))
        .and(body_string(expected_program))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(1)))
        .expect(1)
        .mount(&server)
        .await;
    let client = client_with_credentials(&server);

    let args = VerbArgs {
        dobj: String::from("any"),
        prep: String::from("in"),
        iobj: String::from("this"),
    };
    client
        .ensure_verb("#7", "put", "player", "rxd", Some(&args))
        .await
        .expect("ensure with custom args should succeed");
}

// ============================================
// Resolution, history, presentations
// ============================================

#[tokio::test]
async fn given_unknown_object_when_resolve_then_returns_absent() {
    let server = server_with_connect().await;
    Mock::given(method("GET"))
        .and(path("/objects/sysobj:nowhere"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let client = client_with_credentials(&server);

    let resolved = client
        .resolve_object("sysobj:nowhere")
        .await
        .expect("absent, not error");

    assert_eq!(resolved, None);
}

#[tokio::test]
async fn given_resolution_payloads_when_resolve_then_first_usable_field_wins() {
    let server = server_with_connect().await;
    Mock::given(method("GET"))
        .and(path("/objects/%237"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"obj": "oid:7"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/objects/%238"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"oid": "oid:8"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/objects/%239"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 9})))
        .mount(&server)
        .await;
    let client = client_with_credentials(&server);

    assert_eq!(
        client.resolve_object("#7").await.unwrap().as_deref(),
        Some("oid:7")
    );
    assert_eq!(
        client.resolve_object("#8").await.unwrap().as_deref(),
        Some("oid:8")
    );
    assert_eq!(client.resolve_object("#9").await.unwrap(), None);
}

/// **VALUE**: Verifies the batched sysobj lookup resolves names through one
/// eval round-trip and normalizes the pair list into a mapping.
///
/// **WHY THIS MATTERS**: Enumerating sysobjs one REST call per name is the
/// N+1 pattern this operation exists to avoid; the single-program contract
/// is the whole point.
#[tokio::test]
async fn given_sysobj_names_when_list_sysobjs_then_maps_names_to_curies() {
    let server = server_with_connect().await;
    Mock::given(method("POST"))
        .and(path("/eval"))
        .and(body_string_contains("names = { \"room\", \"nothing\" };"))
        .and(body_string_contains("typeof(v) == OBJ"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([["room", {"obj": "oid:3"}], ["nothing", 0]])),
        )
        .expect(1)
        .mount(&server)
        .await;
    let client = client_with_credentials(&server);

    let names = [String::from("room"), String::from("nothing")];
    let resolved = client
        .list_sysobjs(Some(&names))
        .await
        .expect("lookup should succeed");

    assert_eq!(resolved.get("room"), Some(&json!("oid:3")));
    assert_eq!(resolved.get("nothing"), Some(&json!(null)));
}

#[tokio::test]
async fn given_window_arguments_when_get_history_then_query_params_are_sent() {
    let server = server_with_connect().await;
    Mock::given(method("GET"))
        .and(path("/api/history"))
        .and(query_param("since_seconds", "60"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;
    let client = client_with_credentials(&server);

    client
        .get_history(Some(60), Some(5))
        .await
        .expect("history should succeed");
}

#[tokio::test]
async fn given_presentations_when_listed_then_token_header_is_sent() {
    let server = server_with_connect().await;
    Mock::given(method("GET"))
        .and(path("/api/presentations"))
        .and(header("X-Moor-Auth-Token", TEST_TOKEN))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": "p1"}])))
        .expect(1)
        .mount(&server)
        .await;
    let client = client_with_credentials(&server);

    let result = client.list_presentations().await.expect("list should succeed");

    assert_eq!(result, Some(json!([{"id": "p1"}])));
}

/// The dismiss endpoint answers with an empty body; that counts as success.
#[tokio::test]
async fn given_empty_response_body_when_dismiss_presentation_then_succeeds() {
    let server = server_with_connect().await;
    Mock::given(method("DELETE"))
        .and(path("/api/presentations/p1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    let client = client_with_credentials(&server);

    let result = client
        .dismiss_presentation("p1")
        .await
        .expect("dismiss should succeed");

    assert_eq!(result, Some(json!({})));
}
