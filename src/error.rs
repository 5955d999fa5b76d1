use thiserror::Error;

/// Errors returned by Open Tree client operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Base URL is not a valid absolute URL.
    #[error("invalid base URL '{0}'")]
    InvalidBaseUrl(String),

    /// Endpoint path could not be joined to the base URL.
    #[error("invalid endpoint path '{0}'")]
    InvalidPath(String),

    /// A parameter constraint was violated before any request was sent.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The requested tree-serialization format is not in the extension map.
    #[error("unknown tree schema '{0}'")]
    UnknownSchema(String),

    /// HTTP transport-layer request failure.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-success HTTP status with response payload.
    #[error("server returned status {status}: {body}")]
    HttpStatus {
        status: reqwest::StatusCode,
        body: String,
    },

    /// Response body is not valid UTF-8.
    #[error("failed to decode response text: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Response body could not be parsed as JSON.
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The service reported an error in-band via the `error` response field.
    #[error("service error: {message}")]
    Service { message: String },
}

impl ClientError {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        ClientError::InvalidArgument(message.into())
    }
}
