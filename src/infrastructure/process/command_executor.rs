use super::command_line::CommandLine;
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Instant;
use thiserror::Error;
use tokio::process::Command as TokioCommand;
use tracing::{debug, instrument};

/// Command executor errors
#[derive(Debug, Error)]
pub enum CommandExecutorError {
    #[error("`{command}` failed with exit code {exit_code}: {stderr}")]
    CommandFailed {
        command: String,
        exit_code: i32,
        stderr: String,
    },

    #[error("Process spawn failed for `{command}`: {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl CommandExecutorError {
    /// Exit code of the failed process, if it ran at all.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::CommandFailed { exit_code, .. } => Some(*exit_code),
            _ => None,
        }
    }
}

/// Result of command execution
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// Exit code of the process
    pub exit_code: i32,

    /// Standard output
    pub stdout: String,

    /// Standard error output
    pub stderr: String,

    /// Execution time in milliseconds
    pub execution_time_ms: u64,

    /// Whether the command was successful (exit code 0)
    pub success: bool,
}

impl ExecutionResult {
    /// Create a new execution result
    pub fn new(exit_code: i32, stdout: String, stderr: String, execution_time_ms: u64) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            execution_time_ms,
            success: exit_code == 0,
        }
    }
}

/// Capability that executes command intents on the deploy target.
///
/// The three forms mirror what a remote execution backend offers:
/// `run` raises on a non-zero exit, `capture` does the same but returns
/// stdout, and `test` turns the exit status into a boolean.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run a command, failing on non-zero exit.
    async fn run(&self, command: &CommandLine) -> Result<(), CommandExecutorError>;

    /// Run a command and return its standard output, failing on non-zero exit.
    async fn capture(&self, command: &CommandLine) -> Result<String, CommandExecutorError>;

    /// Run a command and report whether it exited successfully.
    ///
    /// Only failures to start the process are errors.
    async fn test(&self, command: &CommandLine) -> Result<bool, CommandExecutorError>;
}

/// Runs commands as child processes of the current host.
#[derive(Debug, Clone, Default)]
pub struct LocalCommandRunner;

impl LocalCommandRunner {
    pub fn new() -> Self {
        Self
    }

    /// Spawn the command and wait for it, capturing both output streams.
    async fn execute(&self, command: &CommandLine) -> Result<ExecutionResult, CommandExecutorError> {
        let start_time = Instant::now();

        let mut cmd = TokioCommand::new(command.program());
        cmd.args(command.to_argv());

        if let Some(dir) = command.current_dir() {
            cmd.current_dir(dir);
        }
        for (key, value) in command.env_vars() {
            cmd.env(key, value);
        }

        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        let output = cmd
            .output()
            .await
            .map_err(|source| CommandExecutorError::SpawnFailed {
                command: command.to_string(),
                source,
            })?;

        let execution_time = start_time.elapsed().as_millis() as u64;
        let result = ExecutionResult::new(
            output.status.code().unwrap_or(-1),
            String::from_utf8_lossy(&output.stdout).into_owned(),
            String::from_utf8_lossy(&output.stderr).into_owned(),
            execution_time,
        );

        debug!(
            exit_code = result.exit_code,
            elapsed_ms = result.execution_time_ms,
            "command finished"
        );
        Ok(result)
    }

    fn check(command: &CommandLine, result: ExecutionResult) -> Result<ExecutionResult, CommandExecutorError> {
        if result.success {
            Ok(result)
        } else {
            Err(CommandExecutorError::CommandFailed {
                command: command.to_string(),
                exit_code: result.exit_code,
                stderr: result.stderr.trim().to_string(),
            })
        }
    }
}

#[async_trait]
impl CommandRunner for LocalCommandRunner {
    #[instrument(skip_all, fields(command = %command))]
    async fn run(&self, command: &CommandLine) -> Result<(), CommandExecutorError> {
        let result = self.execute(command).await?;
        Self::check(command, result).map(|_| ())
    }

    #[instrument(skip_all, fields(command = %command))]
    async fn capture(&self, command: &CommandLine) -> Result<String, CommandExecutorError> {
        let result = self.execute(command).await?;
        Self::check(command, result).map(|r| r.stdout.trim_end().to_string())
    }

    #[instrument(skip_all, fields(command = %command))]
    async fn test(&self, command: &CommandLine) -> Result<bool, CommandExecutorError> {
        let result = self.execute(command).await?;
        Ok(result.success)
    }
}
