//! Error types for LINE Notify operations

/// Failure raised by a [`Transport`](crate::transport::Transport) before any
/// response was received. Kept boxed so the original error (for example a
/// `reqwest::Error`) can be downcast by the caller.
pub type TransportError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors from LINE Notify operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required argument was empty or whitespace-only.
    #[error("invalid argument: {0} must not be empty")]
    InvalidArgument(&'static str),

    /// The API answered with a non-success status and a well-formed error body.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The HTTP exchange failed before a response was available.
    #[error("transport failure: {0}")]
    Transport(#[source] TransportError),

    /// The HTTP client could not be constructed; no request was attempted.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),

    /// A response body did not have the expected JSON shape.
    #[error("malformed response (HTTP {status}): {source}")]
    MalformedResponse {
        status: u16,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    /// The API-reported message, if this is an API error.
    pub fn api_message(&self) -> Option<&str> {
        match self {
            Error::Api { message, .. } => Some(message),
            _ => None,
        }
    }
}

/// Result alias for LINE Notify operations.
pub type Result<T> = std::result::Result<T, Error>;
