//! Support types for the mooR automation client.
//!
//! This crate contains pure helper types shared by every layer. Nothing in
//! here talks to the network or holds business logic.
//!
//! ## Architecture
//!
//! - **common** (this crate): error locations, status codes, secret handling
//! - **moor-client**: the REST client operating against a mooR server
//! - **moor-cli**: command-line surface wiring everything together
//!
//! This layered architecture keeps concerns separated and makes testing easier.

pub mod error;
pub mod http_status;
pub mod redacted_secret;

pub use error::error_location::ErrorLocation;
pub use error::redact_error::RedactError;
pub use http_status::HttpStatusCode;
pub use redacted_secret::RedactedSecret;
