mod agent;
mod cli;
mod config;
mod exit_codes;
mod logging;
mod passes;
mod pipeline;
mod pool;
mod report;
mod scanner;

use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    match cli.run().await {
        Ok(outcome) if outcome.has_errors() => ExitCode::from(exit_codes::ERRORS_FOUND),
        Ok(_) => ExitCode::from(exit_codes::SUCCESS),
        Err(err) => {
            eprintln!("{} {err:#}", "ai-linter error:".red().bold());
            ExitCode::from(exit_codes::FAILURE)
        }
    }
}
