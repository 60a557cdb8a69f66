//! Agent execution layer.
//!
//! Turns a free-text-producing command-line agent into a structured call:
//! - `adapter`: per-agent argv shape and envelope layout
//! - `extract`: envelope unwrapping and code-fence stripping
//! - `invoker`: process spawning behind the `Executor` strategy
//! - `retry`: the validating retry loop
//! - `runner`: adapter + executor + budget bundled for the passes

mod adapter;
mod error;
mod extract;
mod invoker;
mod retry;
mod runner;

pub use adapter::{AgentAdapter, AgentKind};
pub use error::{AgentError, Result};
pub use extract::Payload;
#[allow(unused_imports)]
pub use invoker::{Executor, ProcessOutput};
pub use runner::AgentRunner;
