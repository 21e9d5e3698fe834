//! Error types for the CLI application.
//!
//! ## Batch Validation Errors
//!
//! `BatchValidationError<T>` tags a failure with the item it came from. The
//! `eval` command uses it to say which of several card pools is invalid.

use holdem_ai::UnknownBot;
use holdem_engine::errors::EngineError;
use std::fmt;

use crate::config::ConfigError;

/// Every failure a command can report. All of them exit with
/// [`crate::exit_code::ERROR`].
#[derive(Debug)]
pub enum CliError {
    /// I/O error (stdout/stderr writes, config file reads)
    Io(std::io::Error),

    /// Invalid user input or command-line arguments
    InvalidInput(String),

    /// Configuration error
    Config(String),

    /// Engine-related error
    Engine(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "I/O error: {}", e),
            CliError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Engine(msg) => write!(f, "Engine error: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        CliError::Io(error)
    }
}

impl From<EngineError> for CliError {
    fn from(error: EngineError) -> Self {
        CliError::Engine(error.to_string())
    }
}

impl From<ConfigError> for CliError {
    fn from(error: ConfigError) -> Self {
        CliError::Config(error.to_string())
    }
}

impl From<UnknownBot> for CliError {
    fn from(error: UnknownBot) -> Self {
        CliError::InvalidInput(error.to_string())
    }
}

/// An error tied to the item that caused it.
///
/// # Examples
///
/// ```rust
/// use holdem_cli::BatchValidationError;
///
/// let error = BatchValidationError {
///     item_context: 2,
///     message: "invalid card `1X`".to_string(),
/// };
/// assert_eq!(error.to_string(), "2: invalid card `1X`");
/// ```
#[derive(Debug)]
pub struct BatchValidationError<T> {
    /// Context identifying the item that failed validation
    pub item_context: T,
    /// Descriptive error message
    pub message: String,
}

impl<T: std::fmt::Display> std::fmt::Display for BatchValidationError<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.item_context, self.message)
    }
}

impl<T: std::fmt::Display> From<BatchValidationError<T>> for CliError {
    fn from(error: BatchValidationError<T>) -> Self {
        CliError::InvalidInput(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_errors_keep_their_message() {
        let e: CliError = EngineError::BustedPlayer("bob".into()).into();
        assert_eq!(e.to_string(), "Engine error: player `bob` has no points left");
    }

    #[test]
    fn batch_errors_become_invalid_input() {
        let e: CliError = BatchValidationError {
            item_context: "pool 1",
            message: "too few cards".to_string(),
        }
        .into();
        assert!(matches!(e, CliError::InvalidInput(ref m) if m == "pool 1: too few cards"));
    }
}
