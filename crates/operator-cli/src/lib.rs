//! # operator-cli
//!
//! Async wrapper around the `operator-cli` validator node tool.
//!
//! Each call runs the CLI as a child process (never through a shell), waits
//! for it under a timeout, and classifies the result: a call succeeds only if
//! the process exits with code 0 and writes nothing to stderr. `status` and
//! `version` output is parsed from YAML into typed records.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use operator_cli::OperatorCli;
//!
//! # async fn example() -> operator_cli::Result<()> {
//! let cli = OperatorCli::new().with_timeout(Duration::from_secs(10));
//!
//! let status = cli.status().await?;
//! println!("validator is {}", status.state);
//!
//! cli.stake("100").await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod client;
pub mod command;
pub mod error;
pub mod runner;
pub mod types;
pub mod yaml;

pub use client::{OperatorCli, DEFAULT_TIMEOUT};
pub use command::{CliCommand, CommandOutput, DEFAULT_PROGRAM};
pub use error::{CliError, Result};
pub use runner::{CommandRunner, FakeEvent, FakeResponse, FakeRunner, ProcessRunner};
pub use types::{NodeInfo, NodeState, NodeStatus, NodeVersion};
