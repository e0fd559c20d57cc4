//! Shared types for CLI command handlers.

use std::fmt;

/// Result type for CLI command execution.
pub type CliResult<T> = Result<T, CliError>;

/// Errors surfaced by CLI commands, mapped to process exit codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    /// The generated rules failed validation
    Validation(String),
    /// A filesystem or serialization operation failed
    Io(String),
}

impl CliError {
    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates an I/O error.
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io(message.into())
    }

    /// The process exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::Validation(_) => ExitCode::ValidationFailed,
            Self::Io(_) => ExitCode::IoError,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(message) | Self::Io(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command completed successfully
    Success = 0,
    /// Generated rules failed validation
    ValidationFailed = 1,
    /// Filesystem or serialization failure
    IoError = 2,
}

impl ExitCode {
    /// The numeric code passed to `process::exit`.
    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_exit_codes() {
        assert_eq!(CliError::validation("x").exit_code().code(), 1);
        assert_eq!(CliError::io("x").exit_code().code(), 2);
        assert_eq!(ExitCode::Success.code(), 0);
    }

    #[test]
    fn test_error_display_is_bare_message() {
        assert_eq!(CliError::validation("bad rule").to_string(), "bad rule");
    }
}
