//! Error types and handling for aiter-stream
//!
//! This module provides the error type shared by the combinators that can
//! reject their input eagerly (configuration, numeric ranges).

/// Main error type for aiter-stream operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StreamError {
    /// A broadcast configuration failed validation
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// An argument was outside the domain the operation accepts
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// Custom error with message
    #[error("Stream error: {0}")]
    Custom(String),
}

impl From<serde_json::Error> for StreamError {
    fn from(err: serde_json::Error) -> Self {
        StreamError::InvalidConfiguration(err.to_string())
    }
}

/// Result type for aiter-stream operations
pub type StreamResult<T> = Result<T, StreamError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            StreamError::InvalidArgument("step cannot be zero".into()).to_string(),
            "Invalid argument: step cannot be zero"
        );
        assert_eq!(
            StreamError::InvalidConfiguration("outputs".into()).to_string(),
            "Invalid configuration: outputs"
        );
        assert_eq!(StreamError::Custom("boom".into()).to_string(), "Stream error: boom");
    }

    #[test]
    fn test_from_serde_json_error() {
        let err = serde_json::from_str::<u32>("-1").unwrap_err();
        assert!(matches!(StreamError::from(err), StreamError::InvalidConfiguration(_)));
    }
}
