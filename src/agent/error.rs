use std::io;

use thiserror::Error;

/// Failure modes of a single agent call, from process spawn down to schema checks.
#[derive(Debug, Error)]
pub enum AgentError {
    /// The operating system could not start the agent binary.
    #[error("Failed to spawn {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    /// The agent ran but exited with a nonzero status.
    #[error("{command} exited with {}: {stderr}", describe_code(.code))]
    ProcessExit {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    /// Exit status was 0 but stdout did not carry a usable envelope.
    #[error("{detail}: {stdout}")]
    Envelope { detail: String, stdout: String },

    /// The envelope's `result` had the wrong type or did not parse as JSON.
    #[error("{0}")]
    Extraction(String),

    /// The payload parsed but does not have the shape the pass expects.
    #[error("Response failed validation: {0}")]
    Validation(String),

    /// Every attempt in the retry budget failed.
    #[error(
        "Agent returned invalid response after {attempts} attempts: {}",
        join_errors(.errors)
    )]
    RetryExhausted {
        attempts: usize,
        errors: Vec<AgentError>,
    },
}

pub type Result<T> = std::result::Result<T, AgentError>;

impl AgentError {
    pub fn missing_result(stdout: &str) -> Self {
        AgentError::Envelope {
            detail: "Agent response missing 'result' field".to_string(),
            stdout: stdout.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        AgentError::Validation(message.into())
    }

    /// True for failures that happened before any output could be inspected.
    pub fn is_process_failure(&self) -> bool {
        matches!(
            self,
            AgentError::Spawn { .. } | AgentError::ProcessExit { .. }
        )
    }
}

fn describe_code(code: &Option<i32>) -> String {
    match *code {
        Some(code) => format!("code {code}"),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

fn join_errors(errors: &[AgentError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(idx, err)| format!("[attempt {}] {err}", idx + 1))
        .collect::<Vec<_>>()
        .join("; ")
}
