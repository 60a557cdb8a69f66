//! Configuration management for ai-linter.
//!
//! Settings are layered, later sources winning:
//! - built-in defaults
//! - JSON file at `~/.ai-linter/config` (or `$AI_LINTER_CONFIG`)
//! - `AI_LINTER_*` environment variables
//! - command-line flags, applied by the caller through `ConfigBuilder`

mod builder;
mod constants;
mod defaults;
mod environment;
mod loader;
mod types;
mod validation;

pub use builder::ConfigBuilder;
#[allow(unused_imports)]
pub use constants::{DEFAULT_CONCURRENCY, DEFAULT_MAX_RETRIES, DEFAULT_OUTPUT_PATH};
pub use types::Config;
#[allow(unused_imports)]
pub use types::{AgentSettings, ModelSettings, RunSettings};

#[cfg(test)]
mod tests;
