use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use clap::builder::RangedU64ValueParser;

use crate::agent::AgentKind;
use crate::pipeline::PipelineOutcome;

use super::commands;

/// Entry point for the `ai-linter` command-line interface.
#[derive(Debug, Parser)]
#[command(
    name = "ai-linter",
    about = "Checks code against plain-language rules in .ai-linter.md files",
    version,
    long_about = None
)]
pub struct Cli {
    /// Project directory to scan for rule files
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Maximum number of agent processes running at once
    #[arg(short = 'c', long, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    pub concurrency: Option<usize>,

    /// Attempts per agent call before giving up
    #[arg(short = 'r', long = "max-retries", value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    pub max_retries: Option<usize>,

    /// Model used for the first (scan) pass
    #[arg(long = "model-fast")]
    pub model_fast: Option<String>,

    /// Model used for the second (verification) pass
    #[arg(long = "model-review")]
    pub model_review: Option<String>,

    /// Agent CLI to drive
    #[arg(long, value_enum)]
    pub agent: Option<AgentKind>,

    /// Where to write the markdown report
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Log agent invocations and raw responses
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

impl Cli {
    pub async fn run(self) -> Result<PipelineOutcome> {
        commands::run(self).await
    }
}
