use std::path::PathBuf;

use serde::Deserialize;

use crate::agent::{AgentAdapter, AgentKind};

#[derive(Debug, Clone)]
pub struct Config {
    pub agent: AgentSettings,
    pub models: ModelSettings,
    pub run: RunSettings,
}

#[derive(Debug, Clone)]
pub struct AgentSettings {
    pub kind: AgentKind,
    /// Attempts per agent call, first try included.
    pub max_retries: usize,
}

/// Model overrides. `None` means the adapter's default.
#[derive(Debug, Clone, Default)]
pub struct ModelSettings {
    pub fast: Option<String>,
    pub review: Option<String>,
}

impl ModelSettings {
    pub fn fast_model(&self, adapter: &dyn AgentAdapter) -> Option<String> {
        self.fast
            .clone()
            .or_else(|| adapter.default_fast_model().map(str::to_string))
    }

    pub fn review_model(&self, adapter: &dyn AgentAdapter) -> Option<String> {
        self.review
            .clone()
            .or_else(|| adapter.default_review_model().map(str::to_string))
    }
}

#[derive(Debug, Clone)]
pub struct RunSettings {
    pub concurrency: usize,
    pub output: PathBuf,
    pub verbose: bool,
}

// File configuration types
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(super) struct FileConfig {
    #[serde(default)]
    pub agent: Option<FileAgentSettings>,
    #[serde(default)]
    pub models: Option<FileModelSettings>,
    #[serde(default)]
    pub run: Option<FileRunSettings>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct FileAgentSettings {
    pub kind: Option<AgentKind>,
    pub max_retries: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct FileModelSettings {
    pub fast: Option<String>,
    pub review: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct FileRunSettings {
    pub concurrency: Option<usize>,
    pub output: Option<PathBuf>,
    pub verbose: Option<bool>,
}
