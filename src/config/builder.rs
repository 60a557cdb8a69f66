use anyhow::Result;

use super::types::{AgentSettings, Config, ModelSettings, RunSettings};
use super::validation::validate;

#[derive(Debug)]
pub struct ConfigBuilder {
    pub(super) agent: AgentSettings,
    pub(super) models: ModelSettings,
    pub(super) run: RunSettings,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            agent: AgentSettings::default(),
            models: ModelSettings::default(),
            run: RunSettings::default(),
        }
    }

    pub fn with_agent<F>(mut self, update: F) -> Self
    where
        F: FnOnce(&mut AgentSettings),
    {
        update(&mut self.agent);
        self
    }

    pub fn with_models<F>(mut self, update: F) -> Self
    where
        F: FnOnce(&mut ModelSettings),
    {
        update(&mut self.models);
        self
    }

    pub fn with_run<F>(mut self, update: F) -> Self
    where
        F: FnOnce(&mut RunSettings),
    {
        update(&mut self.run);
        self
    }

    pub fn build(self) -> Result<Config> {
        let config = Config {
            agent: self.agent,
            models: self.models,
            run: self.run,
        };
        validate(&config)?;
        Ok(config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
