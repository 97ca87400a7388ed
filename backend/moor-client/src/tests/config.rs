// Unit tests for environment-driven settings

use crate::MOOR_SERVER_DEFAULT_BASE_URL;
use crate::config::{BASE_URL_ENV, PASSWORD_ENV, PLAYER_ENV, Settings};
use crate::error::config::ConfigError;

use std::env;

use serial_test::serial;

fn clear_moor_env() {
    // SAFETY: tests touching the process environment run serially.
    unsafe {
        env::remove_var(BASE_URL_ENV);
        env::remove_var(PLAYER_ENV);
        env::remove_var(PASSWORD_ENV);
    }
}

#[test]
#[serial]
fn given_empty_environment_when_from_env_then_uses_defaults() {
    clear_moor_env();

    let settings = Settings::from_env().unwrap();
    assert_eq!(settings.base_url, MOOR_SERVER_DEFAULT_BASE_URL);
    assert_eq!(settings.player, None);
    assert!(settings.password.is_none());
}

/// **VALUE**: Verifies all three variables are picked up together.
///
/// **WHY THIS MATTERS**: This is the only way a headless deployment hands
/// the client its server address and refresh credentials.
#[test]
#[serial]
fn given_full_environment_when_from_env_then_reads_all_values() {
    clear_moor_env();
    // SAFETY: serial test, no concurrent env access.
    unsafe {
        env::set_var(BASE_URL_ENV, "http://moor.example:9000");
        env::set_var(PLAYER_ENV, "wizard");
        env::set_var(PASSWORD_ENV, "hunter2");
    }

    let settings = Settings::from_env().unwrap();
    assert_eq!(settings.base_url, "http://moor.example:9000");
    assert_eq!(settings.player.as_deref(), Some("wizard"));
    assert_eq!(settings.password.unwrap().as_str(), "hunter2");

    clear_moor_env();
}

#[test]
#[serial]
fn given_blank_credential_vars_when_from_env_then_treated_as_unset() {
    clear_moor_env();
    // SAFETY: serial test, no concurrent env access.
    unsafe {
        env::set_var(PLAYER_ENV, "   ");
        env::set_var(PASSWORD_ENV, "");
    }

    let settings = Settings::from_env().unwrap();
    assert_eq!(settings.player, None);
    assert!(settings.password.is_none());

    clear_moor_env();
}

#[test]
fn given_non_http_base_url_when_validate_then_fails() {
    let settings = Settings {
        base_url: String::from("ftp://moor.example"),
        ..Settings::default()
    };
    let error = settings.validate().unwrap_err();
    assert!(matches!(error, ConfigError::Validation { .. }));
}

#[test]
fn given_blank_base_url_when_validate_then_fails() {
    let settings = Settings {
        base_url: String::from("  "),
        ..Settings::default()
    };
    assert!(settings.validate().is_err());
}

#[test]
fn given_https_base_url_when_validate_then_passes() {
    let settings = Settings {
        base_url: String::from("https://moor.example"),
        ..Settings::default()
    };
    assert!(settings.validate().is_ok());
}
