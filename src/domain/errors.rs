//! Domain error types
//!
//! This module defines the error hierarchy for n2md.
//! All errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main n2md error type
///
/// This is the primary error type used throughout the library.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum N2mdError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Notion API errors
    #[error("Notion error: {0}")]
    Notion(#[from] NotionError),

    /// Per-page export errors
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Notion-specific errors
///
/// Errors that occur when talking to the Notion API.
/// These errors don't expose third-party HTTP client types.
#[derive(Debug, Error)]
pub enum NotionError {
    /// Failed to connect to the API
    #[error("Failed to connect to Notion API: {0}")]
    ConnectionFailed(String),

    /// The integration token was rejected
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Database, page or block not found (or not shared with the integration)
    #[error("Object not found: {0}")]
    NotFound(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded, retry after: {0}s")]
    RateLimited(u64),

    /// Server error (5xx)
    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// Client error (4xx)
    #[error("Client error: {status} - {message}")]
    ClientError { status: u16, message: String },

    /// Response body could not be understood
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),

    /// Timeout
    #[error("Request timeout: {0}")]
    Timeout(String),
}

impl NotionError {
    /// Whether the failed request is worth repeating
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            NotionError::ConnectionFailed(_)
                | NotionError::RateLimited(_)
                | NotionError::ServerError { .. }
                | NotionError::Timeout(_)
        )
    }
}

/// Errors raised while turning a single page into a Markdown file
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    /// A configured column does not exist on the page
    #[error("column '{column}' not found on page {page_id}")]
    ColumnNotFound { page_id: String, column: String },

    /// The title property is absent or has no rich-text run
    #[error("page {page_id} has no title in column '{column}'")]
    MissingTitle { page_id: String, column: String },

    /// The freeze column exists but is not a checkbox
    #[error("freeze column '{column}' on page {page_id} is a '{kind}' property, expected checkbox")]
    FreezeColumnNotCheckbox {
        page_id: String,
        column: String,
        kind: String,
    },
}

// Conversion from std::io::Error
impl From<std::io::Error> for N2mdError {
    fn from(err: std::io::Error) -> Self {
        N2mdError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for N2mdError {
    fn from(err: serde_json::Error) -> Self {
        N2mdError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for N2mdError {
    fn from(err: toml::de::Error) -> Self {
        N2mdError::Configuration(format!("TOML parse error: {err}"))
    }
}
