//! Error types for gateway operations.
//!
//! Uses `thiserror` for ergonomic error definitions with automatic `From` implementations.

use thiserror::Error;

/// Error type for all gateway operations.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Oracle call failed (transport, status, or unusable response)
    #[error("LLM call failed: {0}")]
    LlmError(String),

    /// Caller supplied a malformed request
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// District directory could not be loaded
    #[error("District directory error: {0}")]
    DistrictError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl GatewayError {
    /// Create an LLM error with context.
    pub fn llm(msg: impl Into<String>) -> Self {
        Self::LlmError(msg.into())
    }

    /// Create an invalid-argument error with context.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Check if the error was caused by the caller rather than the service.
    ///
    /// # Returns
    ///
    /// `true` for `InvalidArgument`, `false` otherwise
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// Message without the variant prefix, for caller-facing text.
    pub fn detail(&self) -> String {
        match self {
            Self::LlmError(msg)
            | Self::InvalidArgument(msg)
            | Self::DistrictError(msg)
            | Self::ConfigError(msg) => msg.clone(),
            Self::JsonError(e) => e.to_string(),
            Self::IoError(e) => e.to_string(),
        }
    }
}

/// Result type alias for gateway operations.
pub type Result<T> = std::result::Result<T, GatewayError>;
