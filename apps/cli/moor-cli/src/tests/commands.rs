// Unit tests for command-line parsing and JSON argument conversion

use crate::commands::{Cli, Commands, parse_json_array, parse_json_object, parse_json_value};

use clap::Parser;
use serde_json::json;

#[test]
fn given_eval_invocation_when_parsed_then_expression_is_captured() {
    let cli = Cli::try_parse_from(["moor-cli", "eval", "1 + 1"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Eval { ref expression } if expression == "1 + 1"
    ));
}

#[test]
fn given_verbosity_flags_when_parsed_then_count_accumulates() {
    let cli = Cli::try_parse_from(["moor-cli", "-vv", "presentations"]).unwrap();
    assert_eq!(cli.verbose, 2);
    assert!(matches!(cli.command, Commands::Presentations));
}

/// **VALUE**: Verifies ensure-verb defaults line up with the server-side
/// conventions (player-owned, rxd, this/none/none).
///
/// **WHY THIS MATTERS**: Most callers never pass these flags; wrong defaults
/// would create verbs with the wrong ownership or dispatch signature on
/// every unadorned invocation.
#[test]
fn given_bare_ensure_verb_when_parsed_then_defaults_apply() {
    let cli = Cli::try_parse_from(["moor-cli", "ensure-verb", "#7", "greet"]).unwrap();
    match cli.command {
        Commands::EnsureVerb {
            object,
            verb,
            owner,
            perms,
            dobj,
            prep,
            iobj,
        } => {
            assert_eq!(object, "#7");
            assert_eq!(verb, "greet");
            assert_eq!(owner, "player");
            assert_eq!(perms, "rxd");
            assert_eq!(dobj, "this");
            assert_eq!(prep, "none");
            assert_eq!(iobj, "none");
        }
        _ => panic!("expected EnsureVerb"),
    }
}

#[test]
fn given_missing_subcommand_when_parsed_then_fails() {
    assert!(Cli::try_parse_from(["moor-cli"]).is_err());
}

#[test]
fn given_json_arguments_when_parsed_then_shapes_are_enforced() {
    assert_eq!(parse_json_value("3").unwrap(), json!(3));
    assert_eq!(
        parse_json_object(r#"{"name": "thing"}"#).unwrap(),
        json!({"name": "thing"}).as_object().cloned().unwrap()
    );
    assert_eq!(parse_json_array(r#"[1, "a"]"#).unwrap(), vec![json!(1), json!("a")]);

    assert!(parse_json_value("not json").is_err());
    assert!(parse_json_object("[1]").is_err());
    assert!(parse_json_array(r#"{"a": 1}"#).is_err());
}
