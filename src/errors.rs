//! Error types for the lifebuddy companion engine
//!
//! Nothing in this crate is fatal by design: callers at the conversation
//! boundary degrade every failure to an in-character fallback reply, and
//! persistence failures inside store mutators are logged and swallowed.

use thiserror::Error;

/// Main error type for the companion engine
#[derive(Error, Debug)]
pub enum CompanionError {
    /// Persistence medium unavailable or unwritable
    #[error("Storage error: {0}")]
    Storage(String),

    /// HTTP client errors
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Chat-completion API returned a non-success status
    #[error("Chat API error: {0}")]
    Api(String),

    /// External response was missing an expected field
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Talking-head provider errors
    #[error("Video generation error: {0}")]
    Video(String),

    /// Bounded polling exhausted without a terminal status
    #[error("Video generation timed out after {attempts} attempts")]
    Timeout { attempts: u32 },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic errors with context
    #[error("Companion error: {0}")]
    Generic(String),
}

/// Result type alias for companion operations
pub type Result<T> = std::result::Result<T, CompanionError>;

/// Convert anyhow errors to CompanionError
impl From<anyhow::Error> for CompanionError {
    fn from(err: anyhow::Error) -> Self {
        CompanionError::Generic(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CompanionError::Timeout { attempts: 60 };
        assert!(err.to_string().contains("60"));
    }

    #[test]
    fn test_storage_error_display() {
        let err = CompanionError::Storage("quota exceeded".to_string());
        assert!(err.to_string().contains("quota exceeded"));
    }
}
