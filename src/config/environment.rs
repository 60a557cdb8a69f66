use anyhow::{Context, Result, anyhow};
use std::env;
use std::path::PathBuf;

use super::builder::ConfigBuilder;
use crate::agent::AgentKind;

pub fn apply_env_overrides(mut builder: ConfigBuilder) -> Result<ConfigBuilder> {
    if let Some(agent_raw) = env_string("AI_LINTER_AGENT")? {
        let kind = agent_raw
            .parse::<AgentKind>()
            .with_context(|| format!("Failed to parse AI_LINTER_AGENT value '{agent_raw}'"))?;
        builder = builder.with_agent(|agent| agent.kind = kind);
    }

    if let Some(max_retries) = env_usize("AI_LINTER_MAX_RETRIES")? {
        builder = builder.with_agent(|agent| agent.max_retries = max_retries);
    }

    if let Some(concurrency) = env_usize("AI_LINTER_CONCURRENCY")? {
        builder = builder.with_run(|run| run.concurrency = concurrency);
    }

    if let Some(output) = env_string("AI_LINTER_OUTPUT")? {
        builder = builder.with_run(|run| run.output = PathBuf::from(output));
    }

    if let Some(fast) = env_string("AI_LINTER_MODEL_FAST")? {
        builder = builder.with_models(|models| models.fast = non_empty(fast));
    }

    if let Some(review) = env_string("AI_LINTER_MODEL_REVIEW")? {
        builder = builder.with_models(|models| models.review = non_empty(review));
    }

    Ok(builder)
}

pub fn env_string(key: &str) -> Result<Option<String>> {
    match env::var(key) {
        Ok(val) => Ok(Some(val)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(anyhow!("{key} contains invalid UTF-8")),
    }
}

pub fn env_usize(key: &str) -> Result<Option<usize>> {
    if let Some(value) = env_string(key)? {
        let parsed = value
            .trim()
            .parse::<usize>()
            .with_context(|| format!("Failed to parse {key} as a positive integer"))?;
        Ok(Some(parsed))
    } else {
        Ok(None)
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
