//! Error types for `operator-cli` invocations.
//!
//! Every failure mode of an external call is classified here so the HTTP
//! layer can turn it into an upstream-failure response without having to
//! inspect process output itself.

use std::time::Duration;
use thiserror::Error;

/// Result type alias for `operator-cli` operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur while invoking `operator-cli`.
#[derive(Debug, Error)]
pub enum CliError {
    /// An argument cannot be handed to the CLI.
    #[error("invalid {field}: {reason}")]
    InvalidArgument {
        /// Name of the offending argument.
        field: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The CLI process could not be started.
    #[error("failed to spawn '{command}': {source}")]
    Spawn {
        /// The command line that was attempted.
        command: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The CLI exited with a non-zero status.
    #[error("'{command}' {}", exit_description(*.exit_code))]
    NonZeroExit {
        /// The command line that was executed.
        command: String,
        /// Exit code, or `None` if the process was killed by a signal.
        exit_code: Option<i32>,
        /// Captured standard error.
        stderr: String,
    },

    /// The CLI exited successfully but wrote to standard error.
    #[error("'{command}' reported an error: {stderr}")]
    Stderr {
        /// The command line that was executed.
        command: String,
        /// Captured standard error.
        stderr: String,
    },

    /// The CLI did not finish within the configured timeout.
    #[error("'{command}' timed out after {timeout:?}")]
    Timeout {
        /// The command line that was executed.
        command: String,
        /// The timeout that expired.
        timeout: Duration,
    },

    /// The CLI output could not be parsed.
    #[error("failed to parse output of '{command}': {message}")]
    Parse {
        /// The command line that was executed.
        command: String,
        /// Parser diagnostic.
        message: String,
    },
}

fn exit_description(exit_code: Option<i32>) -> String {
    match exit_code {
        Some(code) => format!("exited with code {code}"),
        None => "was terminated by a signal".to_string(),
    }
}

impl CliError {
    /// Create an invalid argument error.
    #[must_use]
    pub fn invalid_argument(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Raw diagnostic text for this failure.
    ///
    /// This is what the CLI itself said where possible (its stderr), and the
    /// underlying error message otherwise.
    #[must_use]
    pub fn detail(&self) -> String {
        match self {
            Self::InvalidArgument { reason, .. } => reason.clone(),
            Self::Spawn { source, .. } => source.to_string(),
            Self::NonZeroExit {
                exit_code, stderr, ..
            } => {
                if stderr.is_empty() {
                    exit_description(*exit_code)
                } else {
                    stderr.clone()
                }
            }
            Self::Stderr { stderr, .. } => stderr.clone(),
            Self::Timeout { timeout, .. } => format!("timed out after {timeout:?}"),
            Self::Parse { message, .. } => message.clone(),
        }
    }

    /// Check if this error was raised before anything was executed.
    #[must_use]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    /// Check if this is a timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_zero_exit_detail_prefers_stderr() {
        let err = CliError::NonZeroExit {
            command: "operator-cli start".into(),
            exit_code: Some(1),
            stderr: "validator already running\n".into(),
        };

        assert_eq!(err.detail(), "validator already running\n");
        assert_eq!(err.to_string(), "'operator-cli start' exited with code 1");
    }

    #[test]
    fn test_non_zero_exit_detail_without_stderr() {
        let err = CliError::NonZeroExit {
            command: "operator-cli stop".into(),
            exit_code: None,
            stderr: String::new(),
        };

        assert_eq!(err.detail(), "was terminated by a signal");
    }

    #[test]
    fn test_spawn_detail() {
        let err = CliError::Spawn {
            command: "operator-cli status".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "No such file or directory"),
        };

        assert_eq!(err.detail(), "No such file or directory");
        assert!(err.to_string().contains("operator-cli status"));
    }

    #[test]
    fn test_timeout() {
        let err = CliError::Timeout {
            command: "operator-cli update".into(),
            timeout: Duration::from_secs(30),
        };

        assert!(err.is_timeout());
        assert!(!err.is_invalid_argument());
        assert_eq!(err.detail(), "timed out after 30s");
    }

    #[test]
    fn test_invalid_argument() {
        let err = CliError::invalid_argument("amount", "must not be empty");

        assert!(err.is_invalid_argument());
        assert_eq!(err.to_string(), "invalid amount: must not be empty");
        assert_eq!(err.detail(), "must not be empty");
    }
}
