use std::path::Path;

use serde_json::Value;

use crate::agent::{AgentError, AgentRunner, Payload, Result};

use super::prompt::build_second_pass_prompt;
use super::types::{RawIssue, VerifiedIssue};

/// Accepts `{"confirmed": false}` or a confirmed, fully described finding.
pub fn parse_second_pass_response(payload: Payload) -> Result<Option<VerifiedIssue>> {
    let value = payload.into_json()?;
    let confirmed = value
        .get("confirmed")
        .and_then(Value::as_bool)
        .ok_or_else(|| AgentError::validation("expected an object with a boolean 'confirmed'"))?;

    if !confirmed {
        return Ok(None);
    }

    serde_json::from_value::<VerifiedIssue>(value)
        .map(Some)
        .map_err(|err| AgentError::validation(format!("confirmed finding is incomplete: {err}")))
}

/// Asks the review model whether `issue` really violates the rules.
pub async fn execute_second_pass(
    runner: &AgentRunner,
    issue: &RawIssue,
    rules_content: &str,
    cwd: &Path,
    model: Option<&str>,
) -> Result<Option<VerifiedIssue>> {
    let prompt = build_second_pass_prompt(issue, rules_content);
    runner
        .run_validated(&prompt, model, cwd, parse_second_pass_response)
        .await
}
