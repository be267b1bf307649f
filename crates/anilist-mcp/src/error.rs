//! Error types for the AniList MCP server.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.

use std::time::Duration;

/// Closed set of failure categories surfaced to MCP clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller input did not match the tool's declared shape.
    Validation,
    /// Login-scoped tool invoked without a usable credential.
    Auth,
    /// The AniList API call failed.
    Upstream,
    /// Failure in server plumbing (serialization, setup).
    Transport,
}

impl ErrorKind {
    /// Stable lowercase name, used in structured logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Auth => "auth",
            Self::Upstream => "upstream",
            Self::Transport => "transport",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors from the HTTP client layer.
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// HTTP transport error (connection, DNS, TLS, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Middleware error
    #[error("Middleware error: {0}")]
    Middleware(#[from] reqwest_middleware::Error),

    /// Rate limited by AniList (429 response)
    #[error("Rate limited, retry after {retry_after:?}")]
    RateLimited {
        /// Suggested wait time before retry
        retry_after: Duration,
    },

    /// Resource not found (404 response)
    #[error("{message}")]
    NotFound {
        /// Error message from API
        message: String,
    },

    /// Invalid request parameters (400 response)
    #[error("{message}")]
    BadRequest {
        /// Error message from API
        message: String,
    },

    /// Token rejected or missing for a login-scoped query (401/403 response)
    #[error("{message}")]
    Unauthorized {
        /// Error message from API
        message: String,
    },

    /// GraphQL `errors` array in an otherwise successful response
    #[error("{message}")]
    GraphQl {
        /// Joined error messages
        message: String,
    },

    /// Response lacked the expected root field
    #[error("Response missing field '{field}'")]
    MissingData {
        /// Root field name
        field: String,
    },

    /// JSON parsing error
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Server error (5xx response)
    #[error("Server error ({status}): {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Unexpected HTTP status
    #[error("Unexpected status {status}: {message}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Response body or message
        message: String,
    },
}

impl ClientError {
    /// Create a rate limited error with retry-after duration.
    #[must_use]
    pub fn rate_limited(seconds: u64) -> Self {
        Self::RateLimited { retry_after: Duration::from_secs(seconds) }
    }

    /// Create a not found error.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound { message: message.into() }
    }

    /// Create a bad request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest { message: message.into() }
    }

    /// Create an unauthorized error.
    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized { message: message.into() }
    }

    /// Create a GraphQL error.
    #[must_use]
    pub fn graphql(message: impl Into<String>) -> Self {
        Self::GraphQl { message: message.into() }
    }

    /// Create a missing data error.
    #[must_use]
    pub fn missing_data(field: impl Into<String>) -> Self {
        Self::MissingData { field: field.into() }
    }

    /// Create a server error.
    #[must_use]
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server { status, message: message.into() }
    }

    /// Get the retry-after duration if this is a rate limit error.
    #[must_use]
    pub const fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited { retry_after } => Some(*retry_after),
            _ => None,
        }
    }
}

/// Errors from MCP tool execution.
#[derive(thiserror::Error, Debug)]
pub enum ToolError {
    /// Error from the API client
    #[error("{0}")]
    Client(#[from] ClientError),

    /// Input validation failed
    #[error("Validation error: {message}")]
    Validation {
        /// Field that failed validation
        field: String,
        /// Validation error message
        message: String,
    },

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ToolError {
    /// Create a validation error.
    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation { field: field.into(), message: message.into() }
    }

    /// Failure category for envelope construction.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Client(_) => ErrorKind::Upstream,
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Serialization(_) => ErrorKind::Transport,
        }
    }

    /// Convert to a user-friendly error message for MCP response.
    #[must_use]
    pub fn to_user_message(&self) -> String {
        match self {
            Self::Client(ClientError::RateLimited { retry_after }) => {
                format!(
                    "Rate limited by AniList API. Please wait {:?} before retrying.",
                    retry_after
                )
            }
            Self::Validation { field, message } => {
                format!("Invalid input for '{field}': {message}")
            }
            _ => self.to_string(),
        }
    }
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Result type alias for tool operations.
pub type ToolResult<T> = Result<T, ToolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_retry_after() {
        let err = ClientError::rate_limited(60);
        assert_eq!(err.retry_after(), Some(Duration::from_secs(60)));

        let err = ClientError::not_found("Media 1");
        assert_eq!(err.retry_after(), None);
    }

    #[test]
    fn test_graphql_message_is_verbatim() {
        let err = ToolError::from(ClientError::graphql("Not Found."));
        assert_eq!(err.to_user_message(), "Not Found.");
    }

    #[test]
    fn test_tool_error_kinds() {
        assert_eq!(ToolError::validation("id", "expected number").kind(), ErrorKind::Validation);
        assert_eq!(ToolError::from(ClientError::not_found("x")).kind(), ErrorKind::Upstream);
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(ToolError::from(parse).kind(), ErrorKind::Transport);
    }

    #[test]
    fn test_tool_error_user_message() {
        let err = ToolError::validation("ids", "cannot be empty");
        assert!(err.to_user_message().contains("ids"));
        assert!(err.to_user_message().contains("cannot be empty"));
    }
}
