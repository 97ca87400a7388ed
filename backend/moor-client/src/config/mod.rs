//! Runtime configuration from the process environment.
//!
//! # Features
//! - Loads .env from cwd or executable directory (non-fatal if missing)
//! - `MOOR_BASE_URL` / `MOOR_PLAYER` / `MOOR_PASSWORD` environment variables
//! - Validation of the base URL before any client is built
//!
//! # Security
//! - The password is wrapped in RedactedSecret the moment it leaves the
//!   environment; it is never logged.

use crate::MOOR_SERVER_DEFAULT_BASE_URL;
use crate::error::config::ConfigError;

use common::RedactedSecret;

use std::env;

use log::{debug, info, warn};

pub const BASE_URL_ENV: &str = "MOOR_BASE_URL";
pub const PLAYER_ENV: &str = "MOOR_PLAYER";
pub const PASSWORD_ENV: &str = "MOOR_PASSWORD";

/// Result of attempting to load a .env file.
#[derive(Debug)]
pub struct EnvLoadResult {
    /// Path to the loaded .env file, if found.
    pub path: Option<std::path::PathBuf>,
    /// Whether any .env file was loaded.
    pub loaded: bool,
}

/// Client configuration: where the server lives and which default
/// credentials, if any, to connect with.
#[derive(Debug)]
pub struct Settings {
    pub base_url: String,
    pub player: Option<String>,
    pub password: Option<RedactedSecret>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: String::from(MOOR_SERVER_DEFAULT_BASE_URL),
            player: None,
            password: None,
        }
    }
}

impl Settings {
    /// Load settings from the environment, after .env discovery.
    ///
    /// Missing variables fall back to defaults (base URL) or stay unset
    /// (credentials); credentials can always be supplied later through an
    /// explicit connect.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if an environment variable holds invalid
    /// unicode or the resulting base URL fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        let env_result = try_load_dotenv();
        if !env_result.loaded {
            debug!("No .env file found - using the existing process environment");
        }

        let base_url = read_optional(BASE_URL_ENV)?
            .unwrap_or_else(|| String::from(MOOR_SERVER_DEFAULT_BASE_URL));
        let player = read_optional(PLAYER_ENV)?;
        let password = read_optional(PASSWORD_ENV)?.map(RedactedSecret::new);

        let settings = Self {
            base_url,
            player,
            password,
        };
        settings.validate()?;

        info!(
            "Settings loaded: base_url={}, player={}, password configured: {}",
            settings.base_url,
            settings.player.as_deref().unwrap_or("<unset>"),
            settings.password.is_some(),
        );
        Ok(settings)
    }

    /// Validate settings values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] if the base URL is empty or not
    /// http(s).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::validation("base URL cannot be empty"));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ConfigError::validation(format!(
                "Invalid base URL format: {}",
                self.base_url
            )));
        }

        Ok(())
    }
}

/// Read an env var, treating "absent" and "blank" the same.
fn read_optional(name: &str) -> Result<Option<String>, ConfigError> {
    match env::var(name) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(ConfigError::env(format!(
            "{name} contains invalid unicode"
        ))),
    }
}

/// Attempts to load .env from known locations.
fn try_load_dotenv() -> EnvLoadResult {
    // Try current directory first
    if let Ok(path) = dotenvy::dotenv() {
        info!("Loaded .env from: {:?}", path);
        return EnvLoadResult {
            path: Some(path),
            loaded: true,
        };
    }

    // Try executable directory
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        let env_path = exe_dir.join(".env");
        if env_path.exists() {
            match dotenvy::from_path(&env_path) {
                Ok(_) => {
                    info!("Loaded .env from: {:?}", env_path);
                    return EnvLoadResult {
                        path: Some(env_path),
                        loaded: true,
                    };
                }
                Err(e) => {
                    warn!("Failed to parse .env at {:?}: {}", env_path, e);
                }
            }
        }
    }

    EnvLoadResult {
        path: None,
        loaded: false,
    }
}
