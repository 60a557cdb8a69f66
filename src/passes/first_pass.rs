use serde_json::Value;
use tracing::{debug, warn};

use crate::agent::{AgentError, AgentRunner, Payload, Result};
use crate::scanner::RuleFile;

use super::prompt::build_first_pass_prompt;
use super::types::RawIssue;

/// Accepts an object with an `issues` array.
///
/// Entries that do not look like an issue are dropped with a warning rather
/// than failing the whole answer.
pub fn parse_first_pass_response(payload: Payload) -> Result<Vec<RawIssue>> {
    let value = payload.into_json()?;
    let entries = value
        .get("issues")
        .and_then(Value::as_array)
        .ok_or_else(|| AgentError::validation("expected an object with an 'issues' array"))?;

    let mut issues = Vec::with_capacity(entries.len());
    for entry in entries {
        match serde_json::from_value::<RawIssue>(entry.clone()) {
            Ok(issue) => issues.push(issue),
            Err(err) => warn!("Skipping malformed issue ({err}): {entry}"),
        }
    }
    Ok(issues)
}

/// Scans the directory owning `rule_file` for violations of its rules.
pub async fn execute_first_pass(
    runner: &AgentRunner,
    rule_file: &RuleFile,
    model: Option<&str>,
) -> Result<Vec<RawIssue>> {
    let prompt = build_first_pass_prompt(&rule_file.content);
    let issues = runner
        .run_validated(&prompt, model, &rule_file.dir, parse_first_pass_response)
        .await?;
    debug!(
        dir = %rule_file.dir.display(),
        "First pass reported {} issue(s)",
        issues.len()
    );
    Ok(issues)
}
