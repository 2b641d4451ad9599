//! Error types for the QX client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to the QX platform
#[derive(Debug, Error)]
pub enum ClientError {
    /// The API token was rejected, or re-authentication also failed
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// The platform rejected a submission before running it
    #[error("submission rejected: {0}")]
    Submission(String),

    /// A submitted unit of work reached a terminal failure state
    #[error("execution {handle} failed: {detail}")]
    Execution {
        /// Handle of the failed execution or job
        handle: String,
        /// Detail reported by the platform
        detail: String,
    },

    /// HTTP request failed at the transport layer
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Queried identifier unknown to the platform
    #[error("resource not found: {0}")]
    NotFound(String),

    /// API returned an error status the client has no better name for
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error body from the API
        message: String,
    },

    /// Response body was not the JSON the client expected
    #[error("failed to parse response: {0}")]
    Parse(String),

    /// Client configuration rejected before any request was made
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Check if this error is an authentication failure
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication(_))
    }

    /// Reinterpret a 4xx rejection at a submission seam.
    ///
    /// The platform answers a malformed program, an unknown device or an
    /// exhausted credit balance with a generic 400; at the submit call sites
    /// that is a [`ClientError::Submission`].
    pub(crate) fn into_submission(self) -> Self {
        match self {
            Self::Api { status, message } if (400..500).contains(&status) && status != 401 => {
                Self::Submission(message)
            }
            other => other,
        }
    }
}
