//! Command-line surface: one subcommand per client operation.
//!
//! Commands parse their arguments, call exactly one client operation, and
//! print the JSON result to stdout. No behavior lives here beyond argument
//! conversion.

use crate::error::MoorCliError;

use moor_client::config::Settings;
use moor_client::error::CoreError;
use moor_client::{MoorClient, VerbArgs};

use clap::{Parser, Subcommand};
use log::debug;
use serde_json::{Map, Value, json};

#[derive(Parser)]
#[command(name = "moor-cli")]
#[command(about = "Automation client for a mooR virtual-world server")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Append logs to this file in addition to stderr
    #[arg(long, global = true)]
    pub log_file: Option<std::path::PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Authenticate and store the session token
    Connect { player: String, password: String },
    /// Evaluate a MOO expression or program
    Eval { expression: String },
    /// Create an object, optionally assigning properties
    CreateObject {
        parent: String,
        owner: String,
        /// Property map as JSON, e.g. '{"name": "thing"}'
        #[arg(long)]
        properties: Option<String>,
    },
    /// Assign a property from a JSON value
    SetProperty {
        object: String,
        property: String,
        /// New value as JSON, e.g. '"lobby"' or '[1, 2]'
        value: String,
    },
    /// List properties on an object
    ListProperties {
        object: String,
        #[arg(long)]
        inherited: bool,
    },
    /// Fetch one property
    GetProperty { object: String, property: String },
    /// List verbs on an object
    ListVerbs {
        object: String,
        #[arg(long)]
        inherited: bool,
    },
    /// Fetch a verb's source and metadata
    GetVerb { object: String, verb: String },
    /// Create a verb if it does not exist yet
    EnsureVerb {
        object: String,
        verb: String,
        #[arg(long, default_value = "player")]
        owner: String,
        #[arg(long, default_value = "rxd")]
        perms: String,
        #[arg(long, default_value = "this")]
        dobj: String,
        #[arg(long, default_value = "none")]
        prep: String,
        #[arg(long, default_value = "none")]
        iobj: String,
    },
    /// Ensure a verb exists, then replace its program source
    ProgramVerb {
        object: String,
        verb: String,
        code: String,
    },
    /// Invoke a verb
    InvokeVerb {
        object: String,
        verb: String,
        /// Arguments as a JSON array, e.g. '[1, "a"]'
        #[arg(long)]
        args: Option<String>,
    },
    /// Resolve an address to its canonical CURIE
    Resolve { object: String },
    /// Map sysobj names to object CURIEs (all object-valued ones when no
    /// names are given)
    Sysobjs { names: Vec<String> },
    /// Fetch recent activity history
    History {
        #[arg(long)]
        since_seconds: Option<u64>,
        #[arg(long)]
        limit: Option<u64>,
    },
    /// List pending presentations
    Presentations,
    /// Dismiss a presentation
    Dismiss { id: String },
    /// Move an object to a destination
    Move {
        object: String,
        destination: String,
    },
    /// Recycle (destroy) an object
    Recycle { object: String },
}

/// Run one command against a client built from the environment settings and
/// print its JSON result.
pub async fn run(command: Commands) -> Result<(), MoorCliError> {
    let settings = Settings::from_env().map_err(CoreError::from)?;
    let client = MoorClient::from_settings(&settings).map_err(CoreError::from)?;

    let output = dispatch(&client, command).await?;

    let rendered = serde_json::to_string_pretty(&output)
        .map_err(|e| MoorCliError::cli(format!("failed to render output: {e}")))?;
    println!("{rendered}");
    Ok(())
}

async fn dispatch(client: &MoorClient, command: Commands) -> Result<Value, MoorCliError> {
    let result = match command {
        Commands::Connect { player, password } => {
            client
                .connect(Some(&player), Some(&password))
                .await
                .map_err(CoreError::from)?;
            debug!("Connected as {player}");
            Some(json!({"ok": true, "player": player}))
        }
        Commands::Eval { expression } => client
            .eval_expr(&expression)
            .await
            .map_err(CoreError::from)?,
        Commands::CreateObject {
            parent,
            owner,
            properties,
        } => {
            let properties = properties
                .as_deref()
                .map(parse_json_object)
                .transpose()?;
            client
                .create_object(&parent, &owner, properties.as_ref())
                .await
                .map_err(CoreError::from)?
        }
        Commands::SetProperty {
            object,
            property,
            value,
        } => {
            let value = parse_json_value(&value)?;
            client
                .set_property(&object, &property, &value)
                .await
                .map_err(CoreError::from)?
        }
        Commands::ListProperties { object, inherited } => client
            .list_properties(&object, inherited)
            .await
            .map_err(CoreError::from)?,
        Commands::GetProperty { object, property } => client
            .get_property(&object, &property)
            .await
            .map_err(CoreError::from)?,
        Commands::ListVerbs { object, inherited } => client
            .list_verbs(&object, inherited)
            .await
            .map_err(CoreError::from)?,
        Commands::GetVerb { object, verb } => client
            .get_verb(&object, &verb)
            .await
            .map_err(CoreError::from)?,
        Commands::EnsureVerb {
            object,
            verb,
            owner,
            perms,
            dobj,
            prep,
            iobj,
        } => {
            let args = VerbArgs { dobj, prep, iobj };
            client
                .ensure_verb(&object, &verb, &owner, &perms, Some(&args))
                .await
                .map_err(CoreError::from)?;
            Some(json!({"ok": true}))
        }
        Commands::ProgramVerb { object, verb, code } => {
            // Match the ensure-then-program flow so programming a fresh verb
            // needs only one command.
            client
                .ensure_verb(&object, &verb, "player", "rxd", None)
                .await
                .map_err(CoreError::from)?;
            client
                .program_verb(&object, &verb, &code)
                .await
                .map_err(CoreError::from)?
        }
        Commands::InvokeVerb { object, verb, args } => {
            let args = args.as_deref().map(parse_json_array).transpose()?;
            client
                .invoke_verb(&object, &verb, args)
                .await
                .map_err(CoreError::from)?
        }
        Commands::Resolve { object } => {
            let resolved = client
                .resolve_object(&object)
                .await
                .map_err(CoreError::from)?;
            match resolved {
                Some(curie) => Some(Value::String(curie)),
                None => return Err(MoorCliError::cli("object could not be resolved")),
            }
        }
        Commands::Sysobjs { names } => {
            let names = (!names.is_empty()).then_some(names);
            let resolved = client
                .list_sysobjs(names.as_deref())
                .await
                .map_err(CoreError::from)?;
            Some(Value::Object(resolved))
        }
        Commands::History {
            since_seconds,
            limit,
        } => client
            .get_history(since_seconds, limit)
            .await
            .map_err(CoreError::from)?,
        Commands::Presentations => client
            .list_presentations()
            .await
            .map_err(CoreError::from)?,
        Commands::Dismiss { id } => client
            .dismiss_presentation(&id)
            .await
            .map_err(CoreError::from)?,
        Commands::Move {
            object,
            destination,
        } => client
            .move_object(&object, &destination)
            .await
            .map_err(CoreError::from)?,
        Commands::Recycle { object } => client
            .recycle_object(&object)
            .await
            .map_err(CoreError::from)?,
    };

    Ok(result.unwrap_or(Value::Null))
}

pub(crate) fn parse_json_value(raw: &str) -> Result<Value, MoorCliError> {
    serde_json::from_str(raw).map_err(|e| MoorCliError::cli(format!("invalid JSON value: {e}")))
}

pub(crate) fn parse_json_object(raw: &str) -> Result<Map<String, Value>, MoorCliError> {
    match parse_json_value(raw)? {
        Value::Object(entries) => Ok(entries),
        _ => Err(MoorCliError::cli("expected a JSON object")),
    }
}

pub(crate) fn parse_json_array(raw: &str) -> Result<Vec<Value>, MoorCliError> {
    match parse_json_value(raw)? {
        Value::Array(items) => Ok(items),
        _ => Err(MoorCliError::cli("expected a JSON array")),
    }
}
