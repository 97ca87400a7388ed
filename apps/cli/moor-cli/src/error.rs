use common::ErrorLocation;

use moor_client::error::CoreError;

use std::panic::Location;

use thiserror::Error;

/// Errors surfaced by the CLI.
///
/// Command-line problems (unparseable JSON arguments, logger setup) are
/// distinguished from core client failures, which pass through unchanged
/// with their own taxonomy intact.
#[derive(Debug, Error)]
pub enum MoorCliError {
    /// Bad command-line input or CLI-side setup failure
    #[error("Cli Error: {message} {location}")]
    Cli {
        message: String,
        location: ErrorLocation,
    },

    /// Error from a core client operation
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl MoorCliError {
    #[track_caller]
    pub fn cli(message: impl Into<String>) -> Self {
        MoorCliError::Cli {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
