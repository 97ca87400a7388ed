//! REST client for a mooR virtual-world server.
//!
//! One [`MoorClient`] wraps a shared [`AuthSession`] and a reqwest client
//! with a single configured timeout. Every operation builds a
//! [`RequestContext`] and funnels through [`MoorClient::execute`], which owns
//! header assembly, the one-shot token refresh on 401, and mapping into the
//! error taxonomy - including faults the server reports inside an HTTP 2xx
//! payload (the eval endpoint always answers 200 and signals errors in the
//! body).

use crate::auth::AuthSession;
use crate::config::Settings;
use crate::curie;
use crate::error::moor_client::MoorClientError;
use crate::literal;

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use log::{debug, info};
use regex::Regex;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode};
use serde_json::{Map, Value};
use tokio::sync::Mutex;
use url::Url;

const DEFAULT_TIMEOUT_DURATION: Duration = Duration::from_secs(30);

/// Response header carrying the session token on connect; request header
/// carrying it everywhere else.
pub const MOOR_AUTH_TOKEN_HEADER: &str = "X-Moor-Auth-Token";

const APPLICATION_JSON: &str = "application/json";
const PLAIN_TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

const AUTH_CONNECT_ENDPOINT: &str = "auth/connect";
const EVAL_ENDPOINT: &str = "eval";
const PROPERTIES_ENDPOINT: &str = "properties";
const VERBS_ENDPOINT: &str = "verbs";
const OBJECTS_ENDPOINT: &str = "objects";
const HISTORY_ENDPOINT: &str = "api/history";
const PRESENTATIONS_ENDPOINT: &str = "api/presentations";

/// Statuses the existence probe in [`MoorClient::ensure_verb`] reads as
/// "verb not there yet". Some servers fault with 500 instead of 404 when a
/// verb is unknown.
const VERB_MISSING_STATUSES: &[u16] = &[404, 500];

/// Payload keys that signal an in-band fault despite a 2xx status.
const IN_BAND_ERROR_KEYS: &[&str] = &["error", "error_msg", "error_message"];

const RETURN_KEYWORD_PATTERN: &str = r"\breturn\b";

static RETURN_KEYWORD: OnceLock<Regex> = OnceLock::new();

fn return_keyword() -> &'static Regex {
    RETURN_KEYWORD.get_or_init(|| Regex::new(RETURN_KEYWORD_PATTERN).expect("valid regex pattern"))
}

/// Body attached to one request; the plain form carries its own
/// `Content-Type`.
enum RequestBody {
    Empty,
    Json(Value),
    Plain(String),
}

/// Ephemeral descriptor of one REST call: where it goes, what it carries,
/// and how its response statuses should be read.
struct RequestContext {
    method: Method,
    path: String,
    operation: &'static str,
    query: Vec<(&'static str, String)>,
    body: RequestBody,
    requires_auth: bool,
    absent_statuses: &'static [u16],
    allow_empty: bool,
}

impl RequestContext {
    fn new(method: Method, path: impl Into<String>, operation: &'static str) -> Self {
        Self {
            method,
            path: path.into(),
            operation,
            query: Vec::new(),
            body: RequestBody::Empty,
            requires_auth: true,
            absent_statuses: &[],
            allow_empty: false,
        }
    }

    fn query(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.query.push((name, value.into()));
        self
    }

    fn json_body(mut self, body: Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    fn plain_body(mut self, body: impl Into<String>) -> Self {
        self.body = RequestBody::Plain(body.into());
        self
    }

    /// Statuses that mean "no such thing" rather than failure; they resolve
    /// to `Ok(None)`.
    fn absent_on(mut self, statuses: &'static [u16]) -> Self {
        self.absent_statuses = statuses;
        self
    }

    /// An empty response body counts as success (empty mapping).
    fn allow_empty(mut self) -> Self {
        self.allow_empty = true;
        self
    }
}

/// Verb argument spec: direct object, preposition, indirect object.
#[derive(Debug, Clone)]
pub struct VerbArgs {
    pub dobj: String,
    pub prep: String,
    pub iobj: String,
}

impl Default for VerbArgs {
    fn default() -> Self {
        Self {
            dobj: String::from("this"),
            prep: String::from("none"),
            iobj: String::from("none"),
        }
    }
}

#[derive(Clone)]
pub struct MoorClient {
    base_url: Url,
    client: Client,
    session: Arc<Mutex<AuthSession>>,
}

impl MoorClient {
    /// Create a client with the default timeout and an empty auth session.
    pub fn new(base_url_str: &str) -> Result<Self, MoorClientError> {
        Self::with_session(base_url_str, DEFAULT_TIMEOUT_DURATION, AuthSession::default())
    }

    /// Create a client seeded with the configured base URL and default
    /// credentials.
    pub fn from_settings(settings: &Settings) -> Result<Self, MoorClientError> {
        Self::with_session(
            &settings.base_url,
            DEFAULT_TIMEOUT_DURATION,
            AuthSession::new(settings.player.clone(), settings.password.clone()),
        )
    }

    /// Create a client with an explicit timeout and session.
    ///
    /// The timeout applies to every request this client issues.
    pub fn with_session(
        base_url_str: &str,
        timeout: Duration,
        session: AuthSession,
    ) -> Result<Self, MoorClientError> {
        let base_url = parse_base_url(base_url_str)?;
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url,
            client,
            session: Arc::new(Mutex::new(session)),
        })
    }

    // ------------------------------------------------------------------
    // Auth
    // ------------------------------------------------------------------

    /// Authenticate against `/auth/connect` and return the session token.
    ///
    /// Explicit credentials win over the session defaults; on success the
    /// pair that worked becomes the new defaults, so later implicit
    /// refreshes reuse it.
    ///
    /// # Errors
    ///
    /// [`MoorClientError::AuthenticationRequired`] when neither arguments nor
    /// defaults supply both credentials, [`MoorClientError::InvalidCredentials`]
    /// on 401, [`MoorClientError::AuthFailed`] on any other error status, and
    /// [`MoorClientError::AuthProtocolError`] when the server answers 2xx
    /// without the token header.
    pub async fn connect(
        &self,
        player: Option<&str>,
        password: Option<&str>,
    ) -> Result<String, MoorClientError> {
        let mut session = self.session.lock().await;
        self.connect_locked(&mut session, player, password).await
    }

    /// Drop the session token; also forget the default credentials when
    /// `clear_defaults` is set.
    pub async fn disconnect(&self, clear_defaults: bool) {
        self.session.lock().await.disconnect(clear_defaults);
    }

    /// The current session token, if authenticated.
    pub async fn token(&self) -> Option<String> {
        self.session.lock().await.token().map(str::to_owned)
    }

    /// Return a valid token, connecting with the stored defaults when none
    /// is present. Holding the session lock across the connect call means
    /// concurrent callers await one in-flight refresh instead of each
    /// issuing their own.
    async fn ensure_authenticated(&self) -> Result<String, MoorClientError> {
        let mut session = self.session.lock().await;
        if let Some(token) = session.token() {
            return Ok(token.to_owned());
        }
        self.connect_locked(&mut session, None, None).await
    }

    async fn has_stored_credentials(&self) -> bool {
        self.session.lock().await.has_credentials()
    }

    async fn connect_locked(
        &self,
        session: &mut AuthSession,
        player: Option<&str>,
        password: Option<&str>,
    ) -> Result<String, MoorClientError> {
        let Some((player, password)) = session.resolve_credentials(player, password) else {
            return Err(MoorClientError::missing_credentials());
        };

        let url = self.endpoint_url(AUTH_CONNECT_ENDPOINT)?;
        let form = [("player", player.as_str()), ("password", password.as_str())];
        let response = self.client.post(url).form(&form).send().await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            let details = response_details(response).await;
            return Err(MoorClientError::invalid_credentials(status.as_u16(), details));
        }
        if status.is_client_error() || status.is_server_error() {
            let details = response_details(response).await;
            return Err(MoorClientError::auth_failed(status.as_u16(), details));
        }

        let Some(token) = response
            .headers()
            .get(MOOR_AUTH_TOKEN_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
        else {
            return Err(MoorClientError::auth_protocol(format!(
                "authentication succeeded but no {MOOR_AUTH_TOKEN_HEADER} header was returned"
            )));
        };

        info!("Authenticated against {} as {player}", self.base_url);
        session.authenticated(player, password, token.clone());
        Ok(token)
    }

    // ------------------------------------------------------------------
    // Request execution
    // ------------------------------------------------------------------

    /// Issue one REST call and map the outcome into the error taxonomy.
    ///
    /// A 401 on an authenticated request triggers exactly one token refresh
    /// and retry, and only while stored credentials exist; a second 401 is
    /// terminal. Statuses listed in the context's absent set resolve to
    /// `Ok(None)`. Successful payloads still pass through in-band error
    /// detection before they are returned.
    async fn execute(&self, context: RequestContext) -> Result<Option<Value>, MoorClientError> {
        let url = self.endpoint_url(&context.path)?;
        let mut retried = false;

        let response = loop {
            let token = if context.requires_auth {
                Some(self.ensure_authenticated().await?)
            } else {
                None
            };

            // Auth headers first; context-derived headers layer on top and
            // win on conflict.
            let mut request = self.client.request(context.method.clone(), url.clone());
            if let Some(token) = &token {
                request = request
                    .header(MOOR_AUTH_TOKEN_HEADER, token)
                    .header(ACCEPT, APPLICATION_JSON);
            }
            if !context.query.is_empty() {
                request = request.query(&context.query);
            }
            request = match &context.body {
                RequestBody::Empty => request,
                RequestBody::Json(body) => request.json(body),
                RequestBody::Plain(text) => request
                    .header(CONTENT_TYPE, PLAIN_TEXT_CONTENT_TYPE)
                    .body(text.clone()),
            };

            let response = request.send().await?;

            if response.status() == StatusCode::UNAUTHORIZED
                && context.requires_auth
                && !retried
                && self.has_stored_credentials().await
            {
                debug!(
                    "{}: token rejected, refreshing and retrying once",
                    context.operation
                );
                retried = true;
                self.session.lock().await.invalidate();
                continue;
            }

            break response;
        };

        let status = response.status();

        if context.absent_statuses.contains(&status.as_u16()) {
            return Ok(None);
        }

        if status.is_client_error() || status.is_server_error() {
            let details = response_details(response).await;
            if status == StatusCode::UNAUTHORIZED && context.requires_auth {
                return Err(if retried {
                    MoorClientError::token_expired(context.operation, status.as_u16(), details)
                } else {
                    MoorClientError::token_rejected(status.as_u16(), details)
                });
            }
            return Err(MoorClientError::request_failed(
                context.operation,
                status.as_u16(),
                details,
            ));
        }

        let body = response.bytes().await?;
        if body.is_empty() {
            return Ok(context.allow_empty.then(|| Value::Object(Map::new())));
        }

        let payload = match serde_json::from_slice::<Value>(&body) {
            Ok(decoded) => decoded,
            Err(_) => Value::String(String::from_utf8_lossy(&body).into_owned()),
        };

        ensure_no_moo_errors(&payload, context.operation)?;
        Ok(Some(payload))
    }

    fn endpoint_url(&self, path: &str) -> Result<Url, MoorClientError> {
        Ok(self.base_url.join(path)?)
    }

    // ------------------------------------------------------------------
    // Object operations
    // ------------------------------------------------------------------

    /// Evaluate a MOO program and return its value.
    ///
    /// Single-line input without a `return` keyword is normalized to
    /// `return <expr>;` as a convenience. This is heuristic text surgery,
    /// not parsing; multi-statement or comment-bearing one-liners may
    /// normalize incorrectly.
    ///
    /// # Errors
    ///
    /// [`MoorClientError::InvalidArgument`] when the trimmed expression is
    /// empty.
    pub async fn eval_expr(&self, expression: &str) -> Result<Option<Value>, MoorClientError> {
        let expression = expression.trim();
        if expression.is_empty() {
            return Err(MoorClientError::invalid_argument(
                "expression must not be empty",
            ));
        }
        let program = normalize_single_line(expression);
        self.execute(
            RequestContext::new(Method::POST, EVAL_ENDPOINT, "eval_expr").plain_body(program),
        )
        .await
    }

    /// Create an object under `parent_curie` owned by `owner_curie`,
    /// assigning each supplied property in iteration order, and return the
    /// new object reference.
    pub async fn create_object(
        &self,
        parent_curie: &str,
        owner_curie: &str,
        properties: Option<&Map<String, Value>>,
    ) -> Result<Option<Value>, MoorClientError> {
        let parent_expr = curie::to_expression(parent_curie)?;
        let owner_expr = curie::to_expression(owner_curie)?;

        let mut lines = vec![format!("obj = create({parent_expr}, {owner_expr});")];
        if let Some(properties) = properties {
            for (property_name, value) in properties {
                let moo_literal = literal::to_moo_literal(value);
                lines.push(format!("obj.{property_name} = {moo_literal};"));
            }
        }
        lines.push(String::from("return obj;"));

        self.execute(
            RequestContext::new(Method::POST, EVAL_ENDPOINT, "create_object")
                .plain_body(lines.join("\n")),
        )
        .await
    }

    /// Assign a property and return its new value.
    pub async fn set_property(
        &self,
        object_curie: &str,
        property_name: &str,
        value: &Value,
    ) -> Result<Option<Value>, MoorClientError> {
        let target_expr = curie::to_expression(object_curie)?;
        let moo_literal = literal::to_moo_literal(value);
        let program = format!(
            "{target_expr}.{property_name} = {moo_literal};\nreturn {target_expr}.{property_name};"
        );
        self.execute(
            RequestContext::new(Method::POST, EVAL_ENDPOINT, "set_property").plain_body(program),
        )
        .await
    }

    /// List properties on an object, optionally including inherited ones.
    pub async fn list_properties(
        &self,
        object_curie: &str,
        inherited: bool,
    ) -> Result<Option<Value>, MoorClientError> {
        let path = format!(
            "{PROPERTIES_ENDPOINT}/{}",
            curie::to_path_segment(object_curie)
        );
        self.execute(
            RequestContext::new(Method::GET, path, "list_properties")
                .query("inherited", inherited.to_string()),
        )
        .await
    }

    /// Fetch one property. A 404 here is a real error; callers that expect
    /// absence should probe with [`MoorClient::list_properties`] first.
    pub async fn get_property(
        &self,
        object_curie: &str,
        property_name: &str,
    ) -> Result<Option<Value>, MoorClientError> {
        let path = format!(
            "{PROPERTIES_ENDPOINT}/{}/{property_name}",
            curie::to_path_segment(object_curie)
        );
        self.execute(RequestContext::new(Method::GET, path, "get_property"))
            .await
    }

    /// List verbs on an object, optionally including inherited ones.
    pub async fn list_verbs(
        &self,
        object_curie: &str,
        inherited: bool,
    ) -> Result<Option<Value>, MoorClientError> {
        let path = format!("{VERBS_ENDPOINT}/{}", curie::to_path_segment(object_curie));
        self.execute(
            RequestContext::new(Method::GET, path, "list_verbs")
                .query("inherited", inherited.to_string()),
        )
        .await
    }

    /// Fetch a verb's source and metadata; `None` when the verb does not
    /// exist.
    pub async fn get_verb(
        &self,
        object_curie: &str,
        verb_name: &str,
    ) -> Result<Option<Value>, MoorClientError> {
        let path = format!(
            "{VERBS_ENDPOINT}/{}/{verb_name}",
            curie::to_path_segment(object_curie)
        );
        self.execute(RequestContext::new(Method::GET, path, "get_verb").absent_on(&[404]))
            .await
    }

    /// Create a verb if it does not exist yet; a verb that is already there
    /// is left untouched.
    ///
    /// The existence probe treats 404 and 500 as "missing" and propagates
    /// any other failure. Creation runs inside a server-side `try/endtry`,
    /// so losing a race against another creator is not an error.
    pub async fn ensure_verb(
        &self,
        object_curie: &str,
        verb_name: &str,
        owner_expr: &str,
        perms: &str,
        args: Option<&VerbArgs>,
    ) -> Result<(), MoorClientError> {
        match self.get_verb(object_curie, verb_name).await {
            Ok(Some(existing)) if existing.is_object() => return Ok(()),
            Ok(_) => {}
            Err(error) => {
                let missing = error
                    .status_code()
                    .is_some_and(|status| VERB_MISSING_STATUSES.contains(&status));
                if !missing {
                    return Err(error);
                }
            }
        }

        let default_args = VerbArgs::default();
        let args = args.unwrap_or(&default_args);
        let target_expr = curie::to_expression(object_curie)?;
        let program = format!(
            "try\n  add_verb({target_expr}, {{{owner_expr}, \"{perms}\", \"{verb_name}\"}}, \
             {{\"{}\", \"{}\", \"{}\"}});\nexcept error (ANY)\n  0;\nendtry;\nreturn 1;",
            args.dobj, args.prep, args.iobj,
        );
        self.execute(
            RequestContext::new(Method::POST, EVAL_ENDPOINT, "ensure_verb").plain_body(program),
        )
        .await?;
        Ok(())
    }

    /// Replace a verb's program source.
    pub async fn program_verb(
        &self,
        object_curie: &str,
        verb_name: &str,
        code: &str,
    ) -> Result<Option<Value>, MoorClientError> {
        let path = format!(
            "{VERBS_ENDPOINT}/{}/{verb_name}",
            curie::to_path_segment(object_curie)
        );
        self.execute(RequestContext::new(Method::POST, path, "program_verb").plain_body(code))
            .await
    }

    /// Invoke a verb with JSON-encoded arguments.
    pub async fn invoke_verb(
        &self,
        object_curie: &str,
        verb_name: &str,
        args: Option<Vec<Value>>,
    ) -> Result<Option<Value>, MoorClientError> {
        let path = format!(
            "{VERBS_ENDPOINT}/{}/{verb_name}/invoke",
            curie::to_path_segment(object_curie)
        );
        self.execute(
            RequestContext::new(Method::POST, path, "invoke_verb")
                .json_body(Value::Array(args.unwrap_or_default())),
        )
        .await
    }

    /// Resolve an address to its canonical CURIE; `None` when the object
    /// does not exist or the payload carries no usable reference.
    pub async fn resolve_object(
        &self,
        object_curie: &str,
    ) -> Result<Option<String>, MoorClientError> {
        let path = format!("{OBJECTS_ENDPOINT}/{}", curie::to_path_segment(object_curie));
        let Some(result) = self
            .execute(RequestContext::new(Method::GET, path, "resolve_object").absent_on(&[404]))
            .await?
        else {
            return Ok(None);
        };

        let Some(entries) = result.as_object() else {
            return Ok(None);
        };
        let resolved = ["obj", "oid", "object"]
            .iter()
            .filter_map(|key| entries.get(*key))
            .find(|value| is_present(value));
        Ok(resolved.and_then(Value::as_str).map(str::to_owned))
    }

    /// Map sysobj property names on `#0` to object CURIEs.
    ///
    /// One batched eval walks the requested names (or every property of
    /// `#0` when none are given) and collects `{name, value}` pairs, so the
    /// lookup costs a single round-trip instead of one per name. Requested
    /// names that do not hold an object come back as null; without an
    /// explicit list, non-object properties are skipped entirely.
    pub async fn list_sysobjs(
        &self,
        names: Option<&[String]>,
    ) -> Result<Map<String, Value>, MoorClientError> {
        let (names_stmt, include_all) = match names {
            Some(names) => {
                let names_value =
                    Value::Array(names.iter().cloned().map(Value::String).collect());
                (
                    format!("names = {};", literal::to_moo_literal(&names_value)),
                    true,
                )
            }
            None => (String::from("names = properties(#0);"), false),
        };

        let lines = [
            names_stmt.as_str(),
            "out = {};",
            "for n in (names)",
            "  try",
            "    v = #0.(n);",
            "  except error (ANY)",
            "    v = 0;",
            "  endtry;",
            "  if (typeof(v) == OBJ)",
            "    out = {@out, {n, v}};",
            if include_all {
                "  elseif (1)"
            } else {
                "  elseif (0)"
            },
            "    out = {@out, {n, 0}};",
            "  endif;",
            "endfor;",
            "return out;",
        ];
        let payload = self.eval_expr(&lines.join("\n")).await?;

        // The program answers a list of {name, value} pairs; anything that
        // does not fit that shape is skipped rather than failed.
        let mut resolved = Map::new();
        if let Some(Value::Array(items)) = payload {
            for item in items {
                let Value::Array(pair) = item else { continue };
                let [Value::String(name), value] = pair.as_slice() else {
                    continue;
                };
                let curie = literal::extract_obj_curie(value).filter(|curie| !curie.is_empty());
                resolved.insert(
                    name.clone(),
                    curie.map_or(Value::Null, |curie| Value::String(String::from(curie))),
                );
            }
        }
        Ok(resolved)
    }

    /// Fetch recent activity history.
    pub async fn get_history(
        &self,
        since_seconds: Option<u64>,
        limit: Option<u64>,
    ) -> Result<Option<Value>, MoorClientError> {
        let mut context = RequestContext::new(Method::GET, HISTORY_ENDPOINT, "get_history");
        if let Some(since_seconds) = since_seconds {
            context = context.query("since_seconds", since_seconds.to_string());
        }
        if let Some(limit) = limit {
            context = context.query("limit", limit.to_string());
        }
        self.execute(context).await
    }

    /// List pending UI presentations for this session.
    pub async fn list_presentations(&self) -> Result<Option<Value>, MoorClientError> {
        self.execute(RequestContext::new(
            Method::GET,
            PRESENTATIONS_ENDPOINT,
            "list_presentations",
        ))
        .await
    }

    /// Dismiss a presentation. The server answers with an empty body, which
    /// counts as success here.
    pub async fn dismiss_presentation(
        &self,
        presentation_id: &str,
    ) -> Result<Option<Value>, MoorClientError> {
        let path = format!("{PRESENTATIONS_ENDPOINT}/{presentation_id}");
        self.execute(
            RequestContext::new(Method::DELETE, path, "dismiss_presentation").allow_empty(),
        )
        .await
    }

    /// Move an object to a destination and return the moved object.
    pub async fn move_object(
        &self,
        object_curie: &str,
        destination_curie: &str,
    ) -> Result<Option<Value>, MoorClientError> {
        let object_expr = curie::to_expression(object_curie)?;
        let destination_expr = curie::to_expression(destination_curie)?;
        let program = format!("move({object_expr}, {destination_expr});\nreturn {object_expr};");
        self.execute(
            RequestContext::new(Method::POST, EVAL_ENDPOINT, "move_object").plain_body(program),
        )
        .await
    }

    /// Recycle (destroy) an object.
    pub async fn recycle_object(
        &self,
        object_curie: &str,
    ) -> Result<Option<Value>, MoorClientError> {
        let target_expr = curie::to_expression(object_curie)?;
        let program = format!("recycle({target_expr});\nreturn 1;");
        self.execute(
            RequestContext::new(Method::POST, EVAL_ENDPOINT, "recycle_object").plain_body(program),
        )
        .await
    }
}

/// Normalize a base URL into directory form so endpoint joins append to any
/// base path instead of replacing it.
fn parse_base_url(base_url_str: &str) -> Result<Url, MoorClientError> {
    let trimmed = base_url_str.trim_end_matches('/');
    Ok(Url::parse(&format!("{trimmed}/"))?)
}

/// Best-effort normalization for single-line eval input: ensure a `return`
/// keyword and a terminating `;`. Multi-line programs pass through untouched.
fn normalize_single_line(expression: &str) -> String {
    if expression.contains('\n') {
        return expression.to_string();
    }

    let mut program =
        if return_keyword().is_match(expression) || expression.starts_with("return") {
            expression.to_string()
        } else {
            format!("return {expression}")
        };

    if !program.trim_end().ends_with(';') {
        program = format!("{};", program.trim_end());
    }
    program
}

/// Decode an error-response body for the `details` field: JSON when it
/// parses, raw text otherwise, nothing when empty.
async fn response_details(response: reqwest::Response) -> Option<Value> {
    let body = response.bytes().await.ok()?;
    if body.is_empty() {
        return None;
    }
    match serde_json::from_slice::<Value>(&body) {
        Ok(decoded) => Some(decoded),
        Err(_) => Some(Value::String(String::from_utf8_lossy(&body).into_owned())),
    }
}

/// Fail on payloads that signal a MOO fault despite a successful transport
/// status: a non-empty `errors` list, or a non-empty `error`-family field.
fn ensure_no_moo_errors(payload: &Value, operation: &'static str) -> Result<(), MoorClientError> {
    let Some(entries) = payload.as_object() else {
        return Ok(());
    };

    if let Some(errors) = entries.get("errors").and_then(Value::as_array)
        && !errors.is_empty()
    {
        return Err(MoorClientError::moo_reported(
            operation,
            Value::Array(errors.clone()),
        ));
    }

    for key in IN_BAND_ERROR_KEYS {
        if let Some(value) = entries.get(*key)
            && is_present(value)
        {
            return Err(MoorClientError::moo_reported(operation, value.clone()));
        }
    }

    Ok(())
}

/// Non-empty / non-zero check, mirroring how the server's payloads mark
/// meaningful fields.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(entries) => !entries.is_empty(),
    }
}
