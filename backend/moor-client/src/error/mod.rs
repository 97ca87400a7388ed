pub mod config;
pub mod moor_client;

pub use config::ConfigError;
pub use moor_client::MoorClientError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Client(#[from] moor_client::MoorClientError),

    #[error(transparent)]
    Config(#[from] config::ConfigError),
}
