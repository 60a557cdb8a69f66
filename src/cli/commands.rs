use anyhow::Result;
use colored::Colorize;

use crate::config::{Config, ConfigBuilder};
use crate::logging::init_logging;
use crate::pipeline::{Pipeline, PipelineOutcome};

use super::args::Cli;

pub(crate) async fn run(cli: Cli) -> Result<PipelineOutcome> {
    let config = apply_overrides(&cli, Config::load_builder()?).build()?;
    init_logging(config.run.verbose);

    let outcome = Pipeline::new(config, &cli.path).run().await?;
    print_summary(&outcome);
    Ok(outcome)
}

/// Command-line flags win over the config file and environment.
fn apply_overrides(cli: &Cli, builder: ConfigBuilder) -> ConfigBuilder {
    builder
        .with_agent(|agent| {
            if let Some(kind) = cli.agent {
                agent.kind = kind;
            }
            if let Some(max_retries) = cli.max_retries {
                agent.max_retries = max_retries;
            }
        })
        .with_models(|models| {
            if let Some(fast) = &cli.model_fast {
                models.fast = Some(fast.clone());
            }
            if let Some(review) = &cli.model_review {
                models.review = Some(review.clone());
            }
        })
        .with_run(|run| {
            if let Some(concurrency) = cli.concurrency {
                run.concurrency = concurrency;
            }
            if let Some(output) = &cli.output {
                run.output = output.clone();
            }
            run.verbose |= cli.verbose;
        })
}

fn print_summary(outcome: &PipelineOutcome) {
    let Some(report_path) = &outcome.report_path else {
        return;
    };

    let errors = outcome.error_count();
    let warnings = outcome.confirmed.len() - errors;
    let errors_label = format!("{errors} error(s)");
    let warnings_label = format!("{warnings} warning(s)");

    println!();
    println!("{} {}", "Scanned:".bold(), scan_line(outcome));
    println!(
        "{} {}, {}",
        "Summary:".bold(),
        if errors > 0 {
            errors_label.red().bold()
        } else {
            errors_label.green()
        },
        if warnings > 0 {
            warnings_label.yellow()
        } else {
            warnings_label.green()
        }
    );
    println!("{} {}", "Report:".bold(), report_path.display());
}

fn scan_line(outcome: &PipelineOutcome) -> String {
    format!(
        "{} rule file(s), {} potential issue(s), {} confirmed",
        outcome.rule_files,
        outcome.raw_issues,
        outcome.confirmed.len()
    )
}
