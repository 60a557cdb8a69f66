use anyhow::{Result, bail};

use super::types::Config;

pub fn validate(config: &Config) -> Result<()> {
    if config.run.concurrency == 0 {
        bail!("concurrency must be a positive integer, got: 0");
    }
    if config.agent.max_retries == 0 {
        bail!("max retries must be a positive integer, got: 0");
    }
    if config.run.output.as_os_str().is_empty() {
        bail!("output path must not be empty");
    }
    Ok(())
}
