//! Error handling module for the RUES client

use std::fmt;
use std::path::PathBuf;

/// Unified error type for all client operations.
///
/// Expected upstream failures (missing token, rejected request, network
/// trouble, record not found) are always returned as values, never panicked.
#[derive(Debug)]
pub enum RuesError {
    /// A token-requiring operation was invoked on a client without a token.
    /// Produced before any network call is made.
    MissingToken,
    /// Upstream answered with a non-2xx status, or the token endpoint
    /// answered without the token header. The body is preserved verbatim.
    UpstreamRejected {
        status: u16,
        body: serde_json::Value,
    },
    /// Network or body-decode failure; no status code is available.
    TransportFailure(String),
    /// An expected record was absent from an otherwise successful response.
    NotFound(String),
    /// Cache file errors
    Cache {
        message: String,
        path: Option<PathBuf>,
    },
    /// Malformed construction input (bad base URL)
    Config(String),
    /// File IO errors
    Io(String),
    /// JSON parse errors
    Parse(String),
}

impl fmt::Display for RuesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuesError::MissingToken => write!(
                f,
                "Missing token: provide a token when building the client; \
                 you can obtain one with RuesClient::fetch_token"
            ),
            RuesError::UpstreamRejected { status, body } => {
                write!(f, "Upstream rejected request with status {}: {}", status, body)
            }
            RuesError::TransportFailure(msg) => write!(f, "Transport failure: {}", msg),
            RuesError::NotFound(msg) => write!(f, "Not found: {}", msg),
            RuesError::Cache { message, path } => {
                if let Some(path) = path {
                    write!(f, "Cache error at {}: {}", path.display(), message)
                } else {
                    write!(f, "Cache error: {}", message)
                }
            }
            RuesError::Config(msg) => write!(f, "Configuration error: {}", msg),
            RuesError::Io(msg) => write!(f, "IO error: {}", msg),
            RuesError::Parse(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for RuesError {}

impl From<std::io::Error> for RuesError {
    fn from(err: std::io::Error) -> Self {
        RuesError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for RuesError {
    fn from(err: serde_json::Error) -> Self {
        RuesError::Parse(err.to_string())
    }
}

impl From<reqwest::Error> for RuesError {
    fn from(err: reqwest::Error) -> Self {
        RuesError::TransportFailure(err.to_string())
    }
}

impl From<url::ParseError> for RuesError {
    fn from(err: url::ParseError) -> Self {
        RuesError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RuesError>;
