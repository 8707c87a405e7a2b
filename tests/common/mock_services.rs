//! Mock services for testing
//!
//! [`RecordingRunner`] answers `test` and `capture` from a script and keeps
//! the exact argv and working directory of every command it receives.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use relgit::infrastructure::process::{CommandExecutorError, CommandLine, CommandRunner};

/// How a command was issued
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Run,
    Capture,
    Test,
}

/// One command as the runner saw it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCommand {
    pub kind: CallKind,
    /// Program followed by its arguments, credentials included
    pub argv: Vec<String>,
    /// Redacted rendering, as it would appear in logs
    pub display: String,
    pub cwd: Option<PathBuf>,
    pub env: BTreeMap<String, String>,
}

impl RecordedCommand {
    pub fn line(&self) -> String {
        self.argv.join(" ")
    }
}

/// Scripted command runner that records every call
#[derive(Clone, Default)]
pub struct RecordingRunner {
    /// Call history for verification
    call_history: Arc<Mutex<Vec<RecordedCommand>>>,
    /// `test` answers keyed by the full command line; unknown lines answer false
    test_answers: Arc<Mutex<HashMap<String, bool>>>,
    /// `capture` output keyed by the full command line
    capture_answers: Arc<Mutex<HashMap<String, String>>>,
    /// Command lines whose `run` fails with the given stderr
    failures: Arc<Mutex<HashMap<String, String>>>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `test` for the given command line
    pub fn answer_test(&self, line: &str, answer: bool) -> &Self {
        self.test_answers
            .lock()
            .unwrap()
            .insert(line.to_string(), answer);
        self
    }

    /// Answer `capture` for the given command line
    pub fn answer_capture(&self, line: &str, output: &str) -> &Self {
        self.capture_answers
            .lock()
            .unwrap()
            .insert(line.to_string(), output.to_string());
        self
    }

    /// Make `run` fail for the given command line
    pub fn fail_run(&self, line: &str, stderr: &str) -> &Self {
        self.failures
            .lock()
            .unwrap()
            .insert(line.to_string(), stderr.to_string());
        self
    }

    /// Get call history for verification
    pub fn get_call_history(&self) -> Vec<RecordedCommand> {
        self.call_history.lock().unwrap().clone()
    }

    /// Full command lines in call order
    pub fn lines(&self) -> Vec<String> {
        self.get_call_history().iter().map(RecordedCommand::line).collect()
    }

    /// Command lines of `run` calls only
    pub fn run_lines(&self) -> Vec<String> {
        self.get_call_history()
            .iter()
            .filter(|c| c.kind == CallKind::Run)
            .map(RecordedCommand::line)
            .collect()
    }

    /// Clear call history
    pub fn clear_call_history(&self) {
        self.call_history.lock().unwrap().clear();
    }

    fn record(&self, kind: CallKind, command: &CommandLine) -> String {
        let recorded = RecordedCommand {
            kind,
            argv: command.to_full_argv(),
            display: command.to_string(),
            cwd: command.current_dir().map(|p| p.to_path_buf()),
            env: command.env_vars().clone(),
        };
        let line = recorded.line();
        self.call_history.lock().unwrap().push(recorded);
        line
    }

    fn failure(command: &CommandLine, stderr: String) -> CommandExecutorError {
        CommandExecutorError::CommandFailed {
            command: command.to_string(),
            exit_code: 1,
            stderr,
        }
    }
}

#[async_trait]
impl CommandRunner for RecordingRunner {
    async fn run(&self, command: &CommandLine) -> Result<(), CommandExecutorError> {
        let line = self.record(CallKind::Run, command);
        match self.failures.lock().unwrap().get(&line) {
            Some(stderr) => Err(Self::failure(command, stderr.clone())),
            None => Ok(()),
        }
    }

    async fn capture(&self, command: &CommandLine) -> Result<String, CommandExecutorError> {
        let line = self.record(CallKind::Capture, command);
        match self.capture_answers.lock().unwrap().get(&line) {
            Some(output) => Ok(output.clone()),
            None => Err(Self::failure(command, format!("no scripted output for `{line}`"))),
        }
    }

    async fn test(&self, command: &CommandLine) -> Result<bool, CommandExecutorError> {
        let line = self.record(CallKind::Test, command);
        Ok(self
            .test_answers
            .lock()
            .unwrap()
            .get(&line)
            .copied()
            .unwrap_or(false))
    }
}
