use std::path::PathBuf;

use super::constants::*;
use super::types::{AgentSettings, RunSettings};

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            kind: Default::default(),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            output: PathBuf::from(DEFAULT_OUTPUT_PATH),
            verbose: false,
        }
    }
}
