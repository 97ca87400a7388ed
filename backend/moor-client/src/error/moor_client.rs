//! Error taxonomy for mooR REST operations.
//!
//! Key design decisions:
//! - HTTP status codes stored directly (not parsed from strings)
//! - Server-provided details kept as decoded JSON, never stringified early
//! - Auth-family errors carry a resolution hint for the caller
//! - All errors include ErrorLocation for debugging
//! - `#[track_caller]` for automatic location capture

use common::{ErrorLocation, HttpStatusCode};

use std::panic::Location;

use serde_json::Value;
use thiserror::Error as ThisError;

const REAUTHENTICATE_RESOLUTION: &str = "re-authenticate with connect(player, password)";
const VERIFY_CREDENTIALS_RESOLUTION: &str = "verify player/password and call connect again";

#[derive(Debug, ThisError)]
pub enum MoorClientError {
    /// Empty or otherwise unusable object identifier.
    #[error("Invalid Identifier: {message} {location}")]
    InvalidIdentifier {
        message: String,
        location: ErrorLocation,
    },

    /// Empty expression or otherwise unusable operation argument.
    #[error("Invalid Argument: {message} {location}")]
    InvalidArgument {
        message: String,
        location: ErrorLocation,
    },

    /// No credentials available, or the token was rejected on the first
    /// attempt of an authenticated request.
    #[error("Authentication Required: {message} {location}")]
    AuthenticationRequired {
        message: String,
        status_code: Option<HttpStatusCode>,
        details: Option<Value>,
        location: ErrorLocation,
    },

    /// 401 from the connect endpoint itself.
    #[error("Invalid Credentials: HTTP {status_code} {location}")]
    InvalidCredentials {
        status_code: HttpStatusCode,
        details: Option<Value>,
        location: ErrorLocation,
    },

    /// Any other connect failure.
    #[error("Auth Failed: HTTP {status_code} {location}")]
    AuthFailed {
        status_code: HttpStatusCode,
        details: Option<Value>,
        location: ErrorLocation,
    },

    /// Connect answered 2xx without the token header. The server broke the
    /// protocol; retrying will not help.
    #[error("Auth Protocol Error: {message} {location}")]
    AuthProtocolError {
        message: String,
        location: ErrorLocation,
    },

    /// 401 on a request that was already retried after a token refresh.
    #[error("Token Expired during {operation}: HTTP {status_code} {location}")]
    TokenExpired {
        operation: &'static str,
        status_code: HttpStatusCode,
        details: Option<Value>,
        location: ErrorLocation,
    },

    /// Generic >=400 from a data endpoint.
    #[error("Request Failed during {operation}: HTTP {status_code} {location}")]
    RequestFailed {
        operation: &'static str,
        status_code: HttpStatusCode,
        details: Option<Value>,
        location: ErrorLocation,
    },

    /// Transport succeeded, but the payload carried an in-band MOO fault.
    #[error("mooR Reported Error during {operation} {location}")]
    MooReported {
        operation: &'static str,
        details: Value,
        location: ErrorLocation,
    },

    /// Transport-level failure out of reqwest (timeout, connection, ...).
    #[error("HTTP Error: {message} {location}")]
    Http {
        message: String,
        location: ErrorLocation,
    },

    #[error("URL Parse Error: {message} {location}")]
    UrlParse {
        message: String,
        location: ErrorLocation,
    },
}

impl From<url::ParseError> for MoorClientError {
    #[track_caller]
    fn from(error: url::ParseError) -> Self {
        MoorClientError::UrlParse {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<reqwest::Error> for MoorClientError {
    #[track_caller]
    fn from(error: reqwest::Error) -> Self {
        MoorClientError::Http {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl MoorClientError {
    #[track_caller]
    pub fn invalid_identifier(message: impl Into<String>) -> Self {
        MoorClientError::InvalidIdentifier {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        MoorClientError::InvalidArgument {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn missing_credentials() -> Self {
        MoorClientError::AuthenticationRequired {
            message: String::from("player and password must be provided for authentication"),
            status_code: None,
            details: None,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn token_rejected(status_code: u16, details: Option<Value>) -> Self {
        MoorClientError::AuthenticationRequired {
            message: String::from("authentication required or token invalid"),
            status_code: Some(HttpStatusCode(status_code)),
            details,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_credentials(status_code: u16, details: Option<Value>) -> Self {
        MoorClientError::InvalidCredentials {
            status_code: HttpStatusCode(status_code),
            details,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn auth_failed(status_code: u16, details: Option<Value>) -> Self {
        MoorClientError::AuthFailed {
            status_code: HttpStatusCode(status_code),
            details,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn auth_protocol(message: impl Into<String>) -> Self {
        MoorClientError::AuthProtocolError {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn token_expired(operation: &'static str, status_code: u16, details: Option<Value>) -> Self {
        MoorClientError::TokenExpired {
            operation,
            status_code: HttpStatusCode(status_code),
            details,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn request_failed(operation: &'static str, status_code: u16, details: Option<Value>) -> Self {
        MoorClientError::RequestFailed {
            operation,
            status_code: HttpStatusCode(status_code),
            details,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn moo_reported(operation: &'static str, details: Value) -> Self {
        MoorClientError::MooReported {
            operation,
            details,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// HTTP status code if this error carries one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            MoorClientError::AuthenticationRequired { status_code, .. } => {
                status_code.map(|status| status.0)
            }
            MoorClientError::InvalidCredentials { status_code, .. }
            | MoorClientError::AuthFailed { status_code, .. }
            | MoorClientError::TokenExpired { status_code, .. }
            | MoorClientError::RequestFailed { status_code, .. } => Some(status_code.0),
            _ => None,
        }
    }

    /// Server-provided details if any were decoded from the response body.
    pub fn details(&self) -> Option<&Value> {
        match self {
            MoorClientError::AuthenticationRequired { details, .. }
            | MoorClientError::InvalidCredentials { details, .. }
            | MoorClientError::AuthFailed { details, .. }
            | MoorClientError::TokenExpired { details, .. }
            | MoorClientError::RequestFailed { details, .. } => details.as_ref(),
            MoorClientError::MooReported { details, .. } => Some(details),
            _ => None,
        }
    }

    /// Human resolution hint, where one exists.
    pub fn resolution(&self) -> Option<&'static str> {
        match self {
            MoorClientError::AuthenticationRequired { .. }
            | MoorClientError::TokenExpired { .. } => Some(REAUTHENTICATE_RESOLUTION),
            MoorClientError::InvalidCredentials { .. } => Some(VERIFY_CREDENTIALS_RESOLUTION),
            _ => None,
        }
    }

    /// Stable category label for logging and metrics.
    pub fn error_category(&self) -> &'static str {
        match self {
            MoorClientError::InvalidIdentifier { .. } => "invalid_identifier",
            MoorClientError::InvalidArgument { .. } => "invalid_argument",
            MoorClientError::AuthenticationRequired { .. } => "authentication_required",
            MoorClientError::InvalidCredentials { .. } => "invalid_credentials",
            MoorClientError::AuthFailed { .. } => "auth_failed",
            MoorClientError::AuthProtocolError { .. } => "auth_protocol",
            MoorClientError::TokenExpired { .. } => "token_expired",
            MoorClientError::RequestFailed { status_code, .. } if status_code.is_server_error() => {
                "server_error"
            }
            MoorClientError::RequestFailed { status_code, .. } if status_code.is_client_error() => {
                "client_error"
            }
            MoorClientError::RequestFailed { .. } => "request_failed",
            MoorClientError::MooReported { .. } => "moo_reported",
            MoorClientError::Http { .. } => "http",
            MoorClientError::UrlParse { .. } => "url_parse",
        }
    }
}
