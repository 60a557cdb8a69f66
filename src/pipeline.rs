//! Two-pass lint run: discover rules, scan, verify, report.

use std::path::{Path, PathBuf};
#[cfg(test)]
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::agent::AgentRunner;
#[cfg(test)]
use crate::agent::Executor;
use crate::config::Config;
use crate::passes::{RawIssue, VerifiedIssue, execute_first_pass, execute_second_pass};
use crate::pool::run_with_concurrency;
use crate::report::generate_report;
use crate::scanner::{RULE_FILE_NAME, RuleFile, scan_for_rule_files};

/// Scan finding waiting for review, tied to the rules file that produced it.
#[derive(Debug, Clone)]
struct PendingIssue {
    issue: RawIssue,
    rule_index: usize,
}

#[derive(Debug, Clone, Default)]
pub struct PipelineOutcome {
    pub rule_files: usize,
    pub raw_issues: usize,
    pub confirmed: Vec<VerifiedIssue>,
    /// Where the report was written; `None` when there was nothing to check.
    pub report_path: Option<PathBuf>,
}

impl PipelineOutcome {
    pub fn has_errors(&self) -> bool {
        self.confirmed.iter().any(VerifiedIssue::is_error)
    }

    pub fn error_count(&self) -> usize {
        self.confirmed.iter().filter(|i| i.is_error()).count()
    }
}

pub struct Pipeline {
    config: Config,
    project_path: PathBuf,
    runner: AgentRunner,
}

impl Pipeline {
    pub fn new(config: Config, project_path: impl Into<PathBuf>) -> Self {
        let runner = AgentRunner::new(config.agent.kind.adapter())
            .with_max_attempts(config.agent.max_retries)
            .with_verbose(config.run.verbose);
        Self {
            config,
            project_path: project_path.into(),
            runner,
        }
    }

    #[cfg(test)]
    pub fn with_executor(mut self, executor: Arc<dyn Executor>) -> Self {
        self.runner = self.runner.with_executor(executor);
        self
    }

    pub async fn run(&self) -> Result<PipelineOutcome> {
        info!(
            "Scanning for {RULE_FILE_NAME} files in {}...",
            self.project_path.display()
        );
        let rule_files = scan_for_rule_files(&self.project_path)?;

        if rule_files.is_empty() {
            info!("No {RULE_FILE_NAME} files found. Nothing to check.");
            return Ok(PipelineOutcome::default());
        }

        info!(
            "Found {} rule file(s). Starting first pass with {}...",
            rule_files.len(),
            self.config.agent.kind
        );
        debug!(
            concurrency = self.config.run.concurrency,
            attempts = self.runner.max_attempts(),
            "Agent limits"
        );
        let pending = self.first_pass(&rule_files).await?;
        info!(
            "First pass complete. Found {} potential issue(s).",
            pending.len()
        );

        let confirmed = if pending.is_empty() {
            info!("No issues found. Code looks clean!");
            Vec::new()
        } else {
            info!("Starting second pass (verification)...");
            let confirmed = self.second_pass(&rule_files, &pending).await?;
            info!(
                "Second pass complete. {} issue(s) confirmed.",
                confirmed.len()
            );
            confirmed
        };

        let report_path = self.write_report(&confirmed).await?;

        Ok(PipelineOutcome {
            rule_files: rule_files.len(),
            raw_issues: pending.len(),
            confirmed,
            report_path: Some(report_path),
        })
    }

    async fn first_pass(&self, rule_files: &[RuleFile]) -> Result<Vec<PendingIssue>> {
        let model = self.config.models.fast_model(self.runner.adapter());
        let runner = &self.runner;

        let results = run_with_concurrency(rule_files, self.config.run.concurrency, |_, rule_file| {
            let rule_file = rule_file.clone();
            let model = model.clone();
            async move {
                debug!("Scanning: {}", rule_file.dir.display());
                execute_first_pass(runner, &rule_file, model.as_deref()).await
            }
        })
        .await
        .context("First pass failed")?;

        Ok(results
            .into_iter()
            .enumerate()
            .flat_map(|(rule_index, issues)| {
                issues
                    .into_iter()
                    .map(move |issue| PendingIssue { issue, rule_index })
            })
            .collect())
    }

    async fn second_pass(
        &self,
        rule_files: &[RuleFile],
        pending: &[PendingIssue],
    ) -> Result<Vec<VerifiedIssue>> {
        let model = self.config.models.review_model(self.runner.adapter());
        let runner = &self.runner;

        let results = run_with_concurrency(pending, self.config.run.concurrency, |_, pending| {
            let pending = pending.clone();
            let model = model.clone();
            async move {
                let rule_file = &rule_files[pending.rule_index];
                debug!("Verifying: {}:{}", pending.issue.file, pending.issue.line);
                execute_second_pass(
                    runner,
                    &pending.issue,
                    &rule_file.content,
                    &rule_file.dir,
                    model.as_deref(),
                )
                .await
            }
        })
        .await
        .context("Second pass failed")?;

        Ok(results.into_iter().flatten().collect())
    }

    async fn write_report(&self, confirmed: &[VerifiedIssue]) -> Result<PathBuf> {
        let report = generate_report(confirmed, &self.project_path);
        let path = resolve_output(&self.config.run.output);
        tokio::fs::write(&path, report)
            .await
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        info!("Report saved to {}", path.display());
        Ok(path)
    }
}

fn resolve_output(output: &Path) -> PathBuf {
    if output.is_absolute() {
        return output.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(output))
        .unwrap_or_else(|_| output.to_path_buf())
}
