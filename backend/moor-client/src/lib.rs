pub mod config;
pub mod curie;
pub mod error;
pub mod literal;

mod auth;
mod moor_client;
#[cfg(test)]
mod tests;

pub use auth::AuthSession;
pub use moor_client::{MOOR_AUTH_TOKEN_HEADER, MoorClient, VerbArgs};

pub const MOOR_SERVER_HOSTNAME: &str = "localhost";
pub const MOOR_SERVER_DEFAULT_PORT: u16 = 8081;
pub const MOOR_SERVER_DEFAULT_BASE_URL: &str = const_format::concatcp!(
    "http://",
    MOOR_SERVER_HOSTNAME,
    ":",
    MOOR_SERVER_DEFAULT_PORT
);
