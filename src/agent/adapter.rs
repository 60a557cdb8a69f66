use std::fmt;

use anyhow::anyhow;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::error::Result;
use super::extract::{EnvelopeShape, Payload, extract_payload};

/// Per-agent knowledge of how to call a command-line agent and read its answer.
pub trait AgentAdapter: Send + Sync {
    /// Executable name looked up on `PATH`.
    fn command(&self) -> &'static str;

    fn default_fast_model(&self) -> Option<&'static str>;

    fn default_review_model(&self) -> Option<&'static str>;

    /// Argument vector for a one-shot prompt in JSON output mode.
    fn build_args(&self, prompt: &str, model: Option<&str>) -> Vec<String>;

    /// Unwraps the answer from the agent's stdout.
    fn extract(&self, stdout: &str) -> Result<Payload>;
}

/// Agent CLIs the linter knows how to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum, Default)]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    #[default]
    Claude,
    Qwen,
}

impl AgentKind {
    pub fn adapter(self) -> &'static dyn AgentAdapter {
        match self {
            AgentKind::Claude => &ClaudeAgent,
            AgentKind::Qwen => &QwenAgent,
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentKind::Claude => write!(f, "claude"),
            AgentKind::Qwen => write!(f, "qwen"),
        }
    }
}

impl std::str::FromStr for AgentKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "claude" => Ok(AgentKind::Claude),
            "qwen" => Ok(AgentKind::Qwen),
            other => Err(anyhow!("Unknown agent '{other}' (expected \"claude\" or \"qwen\")")),
        }
    }
}

fn push_output_flags(args: &mut Vec<String>, model: Option<&str>) {
    args.push("--output-format".to_string());
    args.push("json".to_string());
    if let Some(model) = model.filter(|m| !m.trim().is_empty()) {
        args.push("--model".to_string());
        args.push(model.to_string());
    }
}

/// Anthropic's `claude` CLI in print mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClaudeAgent;

impl AgentAdapter for ClaudeAgent {
    fn command(&self) -> &'static str {
        "claude"
    }

    fn default_fast_model(&self) -> Option<&'static str> {
        Some("haiku")
    }

    fn default_review_model(&self) -> Option<&'static str> {
        Some("sonnet")
    }

    fn build_args(&self, prompt: &str, model: Option<&str>) -> Vec<String> {
        let mut args = vec!["-p".to_string(), prompt.to_string()];
        push_output_flags(&mut args, model);
        args
    }

    fn extract(&self, stdout: &str) -> Result<Payload> {
        extract_payload(stdout, EnvelopeShape::Object)
    }
}

/// The `qwen` CLI. Its JSON mode prints the whole message log as an array.
#[derive(Debug, Clone, Copy, Default)]
pub struct QwenAgent;

impl AgentAdapter for QwenAgent {
    fn command(&self) -> &'static str {
        "qwen"
    }

    fn default_fast_model(&self) -> Option<&'static str> {
        None
    }

    fn default_review_model(&self) -> Option<&'static str> {
        None
    }

    fn build_args(&self, prompt: &str, model: Option<&str>) -> Vec<String> {
        let mut args = vec![prompt.to_string()];
        push_output_flags(&mut args, model);
        args
    }

    fn extract(&self, stdout: &str) -> Result<Payload> {
        extract_payload(stdout, EnvelopeShape::LastOfArray)
    }
}
