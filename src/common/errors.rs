//! Error types for the application

use thiserror::Error;

/// Result type alias using our ClientError
pub type Result<T> = std::result::Result<T, ClientError>;

/// Main error type for client and session operations
#[derive(Error, Debug)]
pub enum ClientError {
    /// WebSocket connection errors
    #[error("WebSocket connection error: {0}")]
    WebSocketConnection(String),

    /// HTTP transport errors (connection refused, timeout, body decode)
    #[error("HTTP request error: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Rejected API key (401/403)
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Rate limiting errors (429)
    #[error("Rate limit exceeded: {message}, retry after {retry_after_seconds:?} seconds")]
    RateLimit {
        message: String,
        retry_after_seconds: Option<u64>,
    },

    /// Rate limit retries ran past the configured ceiling
    #[error("Gave up after {attempts} rate-limited attempts")]
    RetriesExhausted { attempts: u32 },

    /// Resource not found (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other non-success HTTP status
    #[error("Server returned status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// Inbound control message missing required fields
    #[error("Malformed control message: {0}")]
    MalformedMessage(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The client went away before the session finished
    #[error("Session cancelled")]
    Cancelled,

    /// Channel send errors
    #[error("Channel send error: {0}")]
    ChannelSend(String),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ClientError {
    /// Whether the fetcher should wait and retry instead of failing the session
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ClientError::RateLimit { .. })
    }

    /// Server-supplied wait hint carried by a rate-limit error
    pub fn retry_after_seconds(&self) -> Option<u64> {
        match self {
            ClientError::RateLimit {
                retry_after_seconds,
                ..
            } => *retry_after_seconds,
            _ => None,
        }
    }
}
