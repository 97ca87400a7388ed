use common::ErrorLocation;

use std::panic::Location;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("Environment Error: {message} {location}")]
    Env {
        message: String,
        location: ErrorLocation,
    },

    #[error("Validation Error: {reason} {location}")]
    Validation {
        reason: String,
        location: ErrorLocation,
    },
}

impl ConfigError {
    #[track_caller]
    pub fn env(message: impl Into<String>) -> Self {
        ConfigError::Env {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn validation(reason: impl Into<String>) -> Self {
        ConfigError::Validation {
            reason: reason.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
