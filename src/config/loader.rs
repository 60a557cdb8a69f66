use anyhow::{Context, Result};
use dirs::home_dir;
use std::{
    fs,
    path::{Path, PathBuf},
};

use super::Config;
use super::builder::ConfigBuilder;
use super::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME, CONFIG_PATH_ENV};
use super::environment::{apply_env_overrides, env_string};
use super::types::FileConfig;

impl Config {
    pub fn config_path() -> Result<PathBuf> {
        if let Some(path) = env_string(CONFIG_PATH_ENV)? {
            return Ok(PathBuf::from(path));
        }

        let mut path = home_dir().context("Could not determine home directory")?;
        path.push(CONFIG_DIR_NAME);
        path.push(CONFIG_FILE_NAME);
        Ok(path)
    }

    #[cfg(test)]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    #[cfg(test)]
    pub fn load() -> Result<Self> {
        Self::load_builder()?.build()
    }

    /// Defaults, then the config file, then environment overrides.
    /// Callers layer command-line flags on top before building.
    pub fn load_builder() -> Result<ConfigBuilder> {
        let path = Self::config_path()?;
        let mut builder = ConfigBuilder::new();

        if path.exists() {
            builder = Self::apply_file(builder, &path)?;
        }

        apply_env_overrides(builder)
    }

    fn apply_file(builder: ConfigBuilder, path: &Path) -> Result<ConfigBuilder> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed reading config at {}", path.display()))?;

        if contents.trim().is_empty() {
            return Ok(builder);
        }

        let file: FileConfig = serde_json::from_str(&contents)
            .with_context(|| format!("Failed parsing JSON config at {}", path.display()))?;

        Ok(file.apply(builder))
    }
}

impl FileConfig {
    pub fn apply(self, builder: ConfigBuilder) -> ConfigBuilder {
        let mut builder = builder;

        if let Some(agent) = self.agent {
            builder = builder.with_agent(|settings| {
                if let Some(kind) = agent.kind {
                    settings.kind = kind;
                }
                if let Some(max_retries) = agent.max_retries {
                    settings.max_retries = max_retries;
                }
            });
        }

        if let Some(models) = self.models {
            builder = builder.with_models(|settings| {
                if models.fast.is_some() {
                    settings.fast = models.fast;
                }
                if models.review.is_some() {
                    settings.review = models.review;
                }
            });
        }

        if let Some(run) = self.run {
            builder = builder.with_run(|settings| {
                if let Some(concurrency) = run.concurrency {
                    settings.concurrency = concurrency;
                }
                if let Some(output) = run.output {
                    settings.output = output;
                }
                if let Some(verbose) = run.verbose {
                    settings.verbose = verbose;
                }
            });
        }

        builder
    }
}
