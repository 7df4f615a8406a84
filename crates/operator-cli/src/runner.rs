//! Process execution backends.
//!
//! [`CommandRunner`] is the seam between the typed client and the operating
//! system. [`ProcessRunner`] spawns real processes; [`FakeRunner`] replays
//! scripted outputs and records the order in which calls start and finish.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::io;
use std::pin::Pin;
use std::process::Stdio;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::process::Command;

use crate::command::CommandOutput;

/// Executes a program with arguments and captures its output.
///
/// Implementations must not interpret a non-zero exit or stderr output as an
/// error; classification happens in [`crate::OperatorCli`].
pub trait CommandRunner: Send + Sync + fmt::Debug {
    /// Run `program` with `args` to completion.
    ///
    /// Dropping the returned future must abandon the process.
    ///
    /// # Errors
    ///
    /// Returns an error if the process could not be spawned or awaited.
    fn run<'a>(
        &'a self,
        program: &'a str,
        args: &'a [String],
    ) -> Pin<Box<dyn Future<Output = io::Result<CommandOutput>> + Send + 'a>>;
}

/// Runs commands as child processes via `tokio::process`.
///
/// Children are killed when the future driving them is dropped, which is how
/// timeouts and cancelled requests stop a hung CLI.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run<'a>(
        &'a self,
        program: &'a str,
        args: &'a [String],
    ) -> Pin<Box<dyn Future<Output = io::Result<CommandOutput>> + Send + 'a>> {
        Box::pin(async move {
            let output = Command::new(program)
                .args(args)
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .kill_on_drop(true)
                .output()
                .await?;

            Ok(CommandOutput {
                stdout: output.stdout,
                stderr: output.stderr,
                exit_code: output.status.code(),
            })
        })
    }
}

/// Scripted behavior for one subcommand of a [`FakeRunner`].
#[derive(Debug, Clone)]
pub enum FakeResponse {
    /// Finish with this output.
    Output(CommandOutput),
    /// Fail to spawn with this message.
    SpawnError(String),
    /// Never finish.
    Hang,
}

/// A call observed by a [`FakeRunner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FakeEvent {
    /// A call with these arguments started.
    Started(Vec<String>),
    /// A call with these arguments finished (successfully or not).
    Finished(Vec<String>),
}

#[derive(Debug, Clone)]
struct FakeScript {
    response: FakeResponse,
    delay: Duration,
}

impl Default for FakeScript {
    fn default() -> Self {
        Self {
            response: FakeResponse::Output(CommandOutput::success(Vec::new())),
            delay: Duration::ZERO,
        }
    }
}

/// In-memory [`CommandRunner`] for tests and local development.
///
/// Responses are keyed by subcommand (the first argument). Unscripted
/// subcommands succeed with empty output.
#[derive(Debug, Default)]
pub struct FakeRunner {
    scripts: Mutex<HashMap<String, FakeScript>>,
    events: Mutex<Vec<FakeEvent>>,
}

impl FakeRunner {
    /// Create a runner where every subcommand succeeds silently.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the response for `subcommand`.
    #[must_use]
    pub fn with_response(self, subcommand: &str, response: FakeResponse) -> Self {
        self.set_response(subcommand, response);
        self
    }

    /// Script a successful run printing `stdout`.
    #[must_use]
    pub fn with_stdout(self, subcommand: &str, stdout: &str) -> Self {
        self.with_response(
            subcommand,
            FakeResponse::Output(CommandOutput::success(stdout)),
        )
    }

    /// Script an exact output.
    #[must_use]
    pub fn with_output(self, subcommand: &str, output: CommandOutput) -> Self {
        self.with_response(subcommand, FakeResponse::Output(output))
    }

    /// Delay `subcommand` by `delay` before it responds.
    #[must_use]
    pub fn with_delay(self, subcommand: &str, delay: Duration) -> Self {
        self.scripts
            .lock()
            .entry(subcommand.to_string())
            .or_default()
            .delay = delay;
        self
    }

    /// Replace the response for `subcommand` on a shared runner.
    pub fn set_response(&self, subcommand: &str, response: FakeResponse) {
        self.scripts
            .lock()
            .entry(subcommand.to_string())
            .or_default()
            .response = response;
    }

    /// Every start and finish observed so far, in order.
    #[must_use]
    pub fn events(&self) -> Vec<FakeEvent> {
        self.events.lock().clone()
    }

    /// Arguments of every call started so far, in order.
    #[must_use]
    pub fn invocations(&self) -> Vec<Vec<String>> {
        self.events
            .lock()
            .iter()
            .filter_map(|event| match event {
                FakeEvent::Started(args) => Some(args.clone()),
                FakeEvent::Finished(_) => None,
            })
            .collect()
    }

    /// Number of calls started for `subcommand`.
    #[must_use]
    pub fn call_count(&self, subcommand: &str) -> usize {
        self.invocations()
            .iter()
            .filter(|args| args.first().is_some_and(|s| s == subcommand))
            .count()
    }

    fn script_for(&self, args: &[String]) -> FakeScript {
        args.first()
            .and_then(|subcommand| self.scripts.lock().get(subcommand).cloned())
            .unwrap_or_default()
    }
}

impl CommandRunner for FakeRunner {
    fn run<'a>(
        &'a self,
        _program: &'a str,
        args: &'a [String],
    ) -> Pin<Box<dyn Future<Output = io::Result<CommandOutput>> + Send + 'a>> {
        Box::pin(async move {
            self.events.lock().push(FakeEvent::Started(args.to_vec()));
            let script = self.script_for(args);

            if !script.delay.is_zero() {
                tokio::time::sleep(script.delay).await;
            }

            let result = match script.response {
                FakeResponse::Output(output) => Ok(output),
                FakeResponse::SpawnError(message) => {
                    Err(io::Error::new(io::ErrorKind::NotFound, message))
                }
                FakeResponse::Hang => std::future::pending().await,
            };

            self.events.lock().push(FakeEvent::Finished(args.to_vec()));
            result
        })
    }
}
