//! Result and error types for Verdadero.

use thiserror::Error;

/// Result type for Verdadero operations
pub type DetectResult<T> = Result<T, DetectError>;

/// Errors that can occur while analyzing a media asset
#[derive(Debug, Error)]
pub enum DetectError {
    /// Declared media type is neither image/* nor video/*
    #[error("Unsupported media type: {mime}")]
    UnsupportedType {
        /// The declared MIME type
        mime: String,
    },

    /// Asset bytes could not be decoded into pixels, or video
    /// metadata/seek failed
    #[error("Decode failed: {message}")]
    Decode {
        /// Error message
        message: String,
    },

    /// Engine invoked before warm-up completed
    #[error("Engine not ready. Call warm_up() before analyzing")]
    EngineNotReady,

    /// Engine configuration rejected during warm-up
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DetectError {
    /// Shorthand for a decode failure with a formatted message.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}
