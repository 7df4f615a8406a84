//! Typed client for the `operator-cli` tool.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::command::{CliCommand, CommandOutput, DEFAULT_PROGRAM};
use crate::error::{CliError, Result};
use crate::runner::{CommandRunner, ProcessRunner};
use crate::types::{NodeStatus, NodeVersion};
use crate::yaml;

/// Default upper bound on a single CLI invocation.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client that runs `operator-cli` subcommands.
///
/// A call fails if the process cannot be spawned, exits non-zero, writes
/// anything to stderr, or does not finish within the timeout. Cloning is
/// cheap; clones share the runner.
#[derive(Clone)]
pub struct OperatorCli {
    program: String,
    timeout: Duration,
    runner: Arc<dyn CommandRunner>,
}

impl OperatorCli {
    /// Create a client that spawns `operator-cli` from `PATH`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_runner(Arc::new(ProcessRunner))
    }

    /// Create a client backed by a custom runner.
    #[must_use]
    pub fn with_runner(runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            timeout: DEFAULT_TIMEOUT,
            runner,
        }
    }

    /// Use a different program name or path.
    #[must_use]
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Set the per-call timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The program being invoked.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// The per-call timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Run a command and classify its outcome.
    ///
    /// # Errors
    ///
    /// Returns an error on spawn failure, non-zero exit, stderr output or timeout.
    pub async fn execute(&self, command: &CliCommand) -> Result<CommandOutput> {
        let args = command.args();
        let description = format!("{} {command}", self.program);

        info!(command = %description, "executing operator-cli command");

        let output = match tokio::time::timeout(self.timeout, self.runner.run(&self.program, &args))
            .await
        {
            Ok(Ok(output)) => output,
            Ok(Err(source)) => {
                return Err(CliError::Spawn {
                    command: description,
                    source,
                });
            }
            Err(_) => {
                warn!(command = %description, timeout = ?self.timeout, "operator-cli command timed out");
                return Err(CliError::Timeout {
                    command: description,
                    timeout: self.timeout,
                });
            }
        };

        debug!(
            command = %description,
            exit_code = ?output.exit_code,
            stdout = %output.stdout_lossy(),
            stderr = %output.stderr_lossy(),
            "operator-cli command finished"
        );

        if !output.success_status() {
            return Err(CliError::NonZeroExit {
                command: description,
                exit_code: output.exit_code,
                stderr: output.stderr_lossy(),
            });
        }

        if !output.stderr.is_empty() {
            return Err(CliError::Stderr {
                command: description,
                stderr: output.stderr_lossy(),
            });
        }

        Ok(output)
    }

    /// Start the validator.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn start(&self) -> Result<()> {
        self.execute(&CliCommand::Start).await.map(drop)
    }

    /// Stop the validator.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn stop(&self) -> Result<()> {
        self.execute(&CliCommand::Stop).await.map(drop)
    }

    /// Query and parse the validator status.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails or prints unparseable YAML.
    pub async fn status(&self) -> Result<NodeStatus> {
        self.query(&CliCommand::Status).await
    }

    /// Stake `amount`, forwarded verbatim.
    ///
    /// # Errors
    ///
    /// Returns an error if the amount is invalid or the command fails.
    pub async fn stake(&self, amount: &str) -> Result<()> {
        let command = CliCommand::stake(amount)?;
        self.execute(&command).await.map(drop)
    }

    /// Unstake `amount`, forwarded verbatim.
    ///
    /// # Errors
    ///
    /// Returns an error if the amount is invalid or the command fails.
    pub async fn unstake(&self, amount: &str) -> Result<()> {
        let command = CliCommand::unstake(amount)?;
        self.execute(&command).await.map(drop)
    }

    /// Update the validator software.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn update(&self) -> Result<()> {
        self.execute(&CliCommand::Update).await.map(drop)
    }

    /// Restart the operator GUI and validator.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn restart(&self) -> Result<()> {
        self.execute(&CliCommand::Restart).await.map(drop)
    }

    /// Query and parse version information.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails or prints unparseable YAML.
    pub async fn version(&self) -> Result<NodeVersion> {
        self.query(&CliCommand::Version).await
    }

    async fn query<T: DeserializeOwned>(&self, command: &CliCommand) -> Result<T> {
        let output = self.execute(command).await?;
        yaml::from_slice(&output.stdout).map_err(|e| CliError::Parse {
            command: format!("{} {command}", self.program),
            message: e.to_string(),
        })
    }
}

impl Default for OperatorCli {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for OperatorCli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperatorCli")
            .field("program", &self.program)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::{FakeResponse, FakeRunner};
    use crate::types::NodeState;

    fn client(runner: FakeRunner) -> (OperatorCli, Arc<FakeRunner>) {
        let runner = Arc::new(runner);
        (OperatorCli::with_runner(runner.clone()), runner)
    }

    #[test]
    fn test_defaults() {
        let cli = OperatorCli::new();

        assert_eq!(cli.program(), "operator-cli");
        assert_eq!(cli.timeout(), DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_builder() {
        let cli = OperatorCli::new()
            .with_program("/opt/shardeum/operator-cli")
            .with_timeout(Duration::from_secs(5));

        assert_eq!(cli.program(), "/opt/shardeum/operator-cli");
        assert_eq!(cli.timeout(), Duration::from_secs(5));
        assert!(format!("{cli:?}").contains("/opt/shardeum/operator-cli"));
    }

    #[tokio::test]
    async fn test_start_success() {
        let (cli, runner) = client(FakeRunner::new());

        cli.start().await.unwrap();

        assert_eq!(runner.invocations(), vec![vec!["start".to_string()]]);
    }

    #[tokio::test]
    async fn test_non_zero_exit() {
        let (cli, _) = client(
            FakeRunner::new().with_output("stop", CommandOutput::failure(1, "not running")),
        );

        let err = cli.stop().await.unwrap_err();

        assert!(matches!(err, CliError::NonZeroExit { exit_code: Some(1), .. }));
        assert_eq!(err.detail(), "not running");
    }

    #[tokio::test]
    async fn test_stderr_with_zero_exit_is_failure() {
        let (cli, _) = client(FakeRunner::new().with_output(
            "start",
            CommandOutput::success("starting").with_stderr("warning: low disk"),
        ));

        let err = cli.start().await.unwrap_err();

        assert!(matches!(err, CliError::Stderr { .. }));
        assert_eq!(err.detail(), "warning: low disk");
    }

    #[tokio::test]
    async fn test_spawn_failure() {
        let (cli, _) = client(
            FakeRunner::new()
                .with_response("start", FakeResponse::SpawnError("No such file".into())),
        );

        let err = cli.start().await.unwrap_err();

        assert!(matches!(err, CliError::Spawn { .. }));
        assert_eq!(err.detail(), "No such file");
    }

    #[tokio::test]
    async fn test_timeout() {
        let (cli, _) = client(FakeRunner::new().with_response("update", FakeResponse::Hang));
        let cli = cli.with_timeout(Duration::from_millis(20));

        let err = cli.update().await.unwrap_err();

        assert!(err.is_timeout());
    }

    #[tokio::test]
    async fn test_status_parses_yaml() {
        let (cli, _) = client(FakeRunner::new().with_stdout(
            "status",
            "state: active\nnodeInfo:\n  publicKey: abc\n",
        ));

        let status = cli.status().await.unwrap();

        assert_eq!(status.state, NodeState::Active);
        assert!(status.node_info.is_some());
    }

    #[tokio::test]
    async fn test_status_with_wei_amounts() {
        let (cli, _) = client(FakeRunner::new().with_stdout(
            "status",
            "state: standby\nstakeAmount: 40000000000000000000\nnodeInfo:\n  stake: 40000000000000000000\n",
        ));

        let status = cli.status().await.unwrap();

        assert_eq!(status.state, NodeState::Standby);
        assert_eq!(status.extra["stakeAmount"].as_f64(), Some(4e19));
    }

    #[tokio::test]
    async fn test_status_unparseable_output() {
        let (cli, _) = client(FakeRunner::new().with_stdout("status", "state: [unterminated"));

        let err = cli.status().await.unwrap_err();

        assert!(matches!(err, CliError::Parse { .. }));
    }

    #[tokio::test]
    async fn test_version_parses_yaml() {
        let (cli, _) = client(FakeRunner::new().with_stdout("version", "runningGuiVersion: 0.4.1\n"));

        let version = cli.version().await.unwrap();

        assert!(version.get("runningGuiVersion").is_some());
    }

    #[tokio::test]
    async fn test_stake_forwards_amount() {
        let (cli, runner) = client(FakeRunner::new());

        cli.stake("12.5").await.unwrap();
        cli.unstake("7").await.unwrap();

        assert_eq!(
            runner.invocations(),
            vec![
                vec!["stake".to_string(), "12.5".to_string()],
                vec!["unstake".to_string(), "7".to_string()],
            ]
        );
    }

    #[tokio::test]
    async fn test_invalid_amount_is_not_executed() {
        let (cli, runner) = client(FakeRunner::new());

        let err = cli.stake("").await.unwrap_err();

        assert!(err.is_invalid_argument());
        assert!(runner.invocations().is_empty());
    }
}
