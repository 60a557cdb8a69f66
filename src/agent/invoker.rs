use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command as TokioCommand;
use tracing::debug;

use super::adapter::AgentAdapter;
use super::error::{AgentError, Result};
use super::extract::Payload;

/// One prompt sent to an agent.
#[derive(Debug, Clone)]
pub struct InvocationRequest {
    pub prompt: String,
    pub model: Option<String>,
    pub cwd: PathBuf,
    pub verbose: bool,
}

impl InvocationRequest {
    pub fn new(prompt: impl Into<String>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            prompt: prompt.into(),
            model: None,
            cwd: cwd.into(),
            verbose: false,
        }
    }

    pub fn with_model(mut self, model: Option<String>) -> Self {
        self.model = model;
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

/// Captured result of a finished process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    #[cfg(test)]
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            exit_code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Strategy that actually runs a command. Swapped out in tests.
#[async_trait]
pub trait Executor: Send + Sync {
    async fn execute(&self, program: &str, args: &[String], cwd: &Path) -> Result<ProcessOutput>;
}

/// Runs agents as real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessExecutor;

#[async_trait]
impl Executor for ProcessExecutor {
    async fn execute(&self, program: &str, args: &[String], cwd: &Path) -> Result<ProcessOutput> {
        let output = TokioCommand::new(program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| AgentError::Spawn {
                command: program.to_string(),
                source,
            })?;

        Ok(ProcessOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Runs one prompt through `adapter` and returns the unwrapped payload.
pub async fn invoke(
    adapter: &dyn AgentAdapter,
    request: &InvocationRequest,
    executor: &dyn Executor,
) -> Result<Payload> {
    let command = adapter.command();
    let args = adapter.build_args(&request.prompt, request.model.as_deref());

    if request.verbose {
        debug!(
            cwd = %request.cwd.display(),
            "Running {command} {}",
            format_args_for_log(&args)
        );
    }

    let output = executor.execute(command, &args, &request.cwd).await?;

    if request.verbose {
        debug!(exit_code = ?output.exit_code, "{command} finished");
        debug!("{command} stdout:\n{}", output.stdout);
    }

    if !output.is_success() {
        return Err(AgentError::ProcessExit {
            command: command.to_string(),
            code: output.exit_code,
            stderr: output.stderr,
        });
    }

    adapter.extract(&output.stdout)
}

fn format_args_for_log(args: &[String]) -> String {
    args.iter()
        .map(|arg| {
            if arg.contains(char::is_whitespace) {
                format!("{arg:?}")
            } else {
                arg.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
