//! `operator-cli` subcommands and their captured output.
//!
//! The CLI is always executed directly, never through `sh -c`, so every
//! argument reaches the tool as a single argv entry exactly as given.

use std::fmt;

use crate::error::{CliError, Result};

/// Program name used when no path override is configured.
pub const DEFAULT_PROGRAM: &str = "operator-cli";

/// A single `operator-cli` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Start the validator.
    Start,
    /// Stop the validator.
    Stop,
    /// Query validator status (YAML on stdout).
    Status,
    /// Stake the given amount.
    Stake {
        /// Amount, forwarded verbatim.
        amount: String,
    },
    /// Unstake the given amount.
    Unstake {
        /// Amount, forwarded verbatim.
        amount: String,
    },
    /// Update the validator software.
    Update,
    /// Restart the operator GUI and validator.
    Restart,
    /// Query versions (YAML on stdout).
    Version,
    /// Query performance figures.
    Performance,
    /// Query network figures.
    Network,
    /// Query operator settings.
    Settings,
}

impl CliCommand {
    /// Build a stake command, validating the amount.
    ///
    /// # Errors
    ///
    /// Returns an error if the amount is empty or cannot be passed to a process.
    pub fn stake(amount: impl Into<String>) -> Result<Self> {
        let amount = amount.into();
        validate_argument(&amount, "amount")?;
        Ok(Self::Stake { amount })
    }

    /// Build an unstake command, validating the amount.
    ///
    /// # Errors
    ///
    /// Returns an error if the amount is empty or cannot be passed to a process.
    pub fn unstake(amount: impl Into<String>) -> Result<Self> {
        let amount = amount.into();
        validate_argument(&amount, "amount")?;
        Ok(Self::Unstake { amount })
    }

    /// The subcommand name.
    #[must_use]
    pub fn subcommand(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Status => "status",
            Self::Stake { .. } => "stake",
            Self::Unstake { .. } => "unstake",
            Self::Update => "update",
            Self::Restart => "restart",
            Self::Version => "version",
            Self::Performance => "performance",
            Self::Network => "network",
            Self::Settings => "settings",
        }
    }

    /// Arguments passed to the program, subcommand first.
    #[must_use]
    pub fn args(&self) -> Vec<String> {
        let mut args = vec![self.subcommand().to_string()];
        if let Self::Stake { amount } | Self::Unstake { amount } = self {
            args.push(amount.clone());
        }
        args
    }
}

impl fmt::Display for CliCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.args().join(" "))
    }
}

/// Validate a command argument.
///
/// # Errors
///
/// Returns an error if the argument is empty or contains a NUL byte, which
/// no process argument can carry.
pub fn validate_argument(arg: &str, field_name: &str) -> Result<()> {
    if arg.is_empty() {
        return Err(CliError::invalid_argument(field_name, "must not be empty"));
    }
    if arg.contains('\0') {
        return Err(CliError::invalid_argument(
            field_name,
            "must not contain NUL bytes",
        ));
    }
    Ok(())
}

/// Captured output of a finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Standard output.
    pub stdout: Vec<u8>,
    /// Standard error.
    pub stderr: Vec<u8>,
    /// Exit code, `None` if terminated by a signal.
    pub exit_code: Option<i32>,
}

impl CommandOutput {
    /// Output of a successful run that printed `stdout`.
    #[must_use]
    pub fn success(stdout: impl Into<Vec<u8>>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: Vec::new(),
            exit_code: Some(0),
        }
    }

    /// Output of a run that exited with `exit_code` after printing `stderr`.
    #[must_use]
    pub fn failure(exit_code: i32, stderr: impl Into<Vec<u8>>) -> Self {
        Self {
            stdout: Vec::new(),
            stderr: stderr.into(),
            exit_code: Some(exit_code),
        }
    }

    /// Attach standard error output.
    #[must_use]
    pub fn with_stderr(mut self, stderr: impl Into<Vec<u8>>) -> Self {
        self.stderr = stderr.into();
        self
    }

    /// Check if the process exited with code 0.
    #[must_use]
    pub fn success_status(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Get stdout as a UTF-8 string, replacing invalid characters.
    #[must_use]
    pub fn stdout_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    /// Get stderr as a UTF-8 string, replacing invalid characters.
    #[must_use]
    pub fn stderr_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }
}
