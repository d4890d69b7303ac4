//! CLI error types.

use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors surfaced to the terminal
#[derive(Debug, Error)]
pub enum CliError {
    /// Engine-level failure
    #[error("{0}")]
    Engine(#[from] verdadero::DetectError),

    /// Unknown policy name on the command line
    #[error("Unknown policy '{0}'. Available: balanced, aggressive, conservative")]
    UnknownPolicy(String),

    /// No input files given
    #[error("No input files to scan")]
    NoInputs,

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_policy_message() {
        let err = CliError::UnknownPolicy("paranoid".to_string());
        assert!(err.to_string().contains("paranoid"));
        assert!(err.to_string().contains("balanced"));
    }

    #[test]
    fn test_engine_error_passthrough() {
        let err: CliError = verdadero::DetectError::EngineNotReady.into();
        assert!(err.to_string().contains("warm_up"));
    }
}
