//! Auth session state for the mooR token protocol.
//!
//! The session is a plain record of default credentials plus the current
//! token. The connect protocol itself lives on `MoorClient`, which keeps the
//! session behind a mutex so concurrent operations never race a refresh.
//!
//! # Security
//! - Passwords wrapped in RedactedSecret (safe Debug impl)
//! - Zeroized on drop
//! - Never logged or serialized

use common::RedactedSecret;

/// Mutable auth state.
///
/// Lifecycle: created empty (or seeded with defaults), populated by a
/// successful connect, token cleared on detected expiry or disconnect.
/// Credentials survive token invalidation so an implicit refresh can run
/// without new input; only `disconnect(true)` clears them.
#[derive(Debug, Default)]
pub struct AuthSession {
    player: Option<String>,
    password: Option<RedactedSecret>,
    token: Option<String>,
}

impl AuthSession {
    /// Create a session with optional default credentials and no token.
    pub fn new(player: Option<String>, password: Option<RedactedSecret>) -> Self {
        Self {
            player,
            password,
            token: None,
        }
    }

    /// The current token, if authenticated.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Whether stored defaults exist, i.e. a refresh can be attempted.
    pub fn has_credentials(&self) -> bool {
        self.player.is_some() && self.password.is_some()
    }

    /// Resolve the credentials a connect attempt should use: explicit
    /// arguments win, stored defaults fill the gaps.
    pub fn resolve_credentials(
        &self,
        player: Option<&str>,
        password: Option<&str>,
    ) -> Option<(String, String)> {
        let player = player.map(str::to_owned).or_else(|| self.player.clone())?;
        let password = password
            .map(str::to_owned)
            .or_else(|| self.password.as_ref().map(|secret| secret.as_str().to_owned()))?;
        Some((player, password))
    }

    /// Record a successful connect: store the token and persist the
    /// credentials that produced it as the new defaults, so a later implicit
    /// refresh can reuse them.
    pub fn authenticated(&mut self, player: String, password: String, token: String) {
        self.player = Some(player);
        self.password = Some(RedactedSecret::new(password));
        self.token = Some(token);
    }

    /// Clear the token only. Used after a detected-expired response;
    /// credentials stay in place for the follow-up refresh.
    pub fn invalidate(&mut self) {
        self.token = None;
    }

    /// Clear the token, and the stored credentials too when requested.
    pub fn disconnect(&mut self, clear_defaults: bool) {
        self.token = None;
        if clear_defaults {
            self.player = None;
            self.password = None;
        }
    }
}
