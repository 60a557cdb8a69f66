use std::path::Path;
use std::sync::Arc;

use super::adapter::AgentAdapter;
use super::error::Result;
use super::extract::Payload;
use super::invoker::{Executor, InvocationRequest, ProcessExecutor, invoke};
use super::retry::run_with_retry;

/// Adapter, executor and retry budget bundled for repeated agent calls.
#[derive(Clone)]
pub struct AgentRunner {
    adapter: &'static dyn AgentAdapter,
    executor: Arc<dyn Executor>,
    max_attempts: usize,
    verbose: bool,
}

impl AgentRunner {
    pub fn new(adapter: &'static dyn AgentAdapter) -> Self {
        Self {
            adapter,
            executor: Arc::new(ProcessExecutor),
            max_attempts: 1,
            verbose: false,
        }
    }

    #[cfg(test)]
    pub fn with_executor(mut self, executor: Arc<dyn Executor>) -> Self {
        self.executor = executor;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn adapter(&self) -> &'static dyn AgentAdapter {
        self.adapter
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Sends `prompt` until `validate` accepts the answer or the budget runs out.
    pub async fn run_validated<T, V>(
        &self,
        prompt: &str,
        model: Option<&str>,
        cwd: &Path,
        validate: V,
    ) -> Result<T>
    where
        V: Fn(Payload) -> Result<T>,
    {
        let request = InvocationRequest::new(prompt, cwd)
            .with_model(model.map(str::to_string))
            .verbose(self.verbose);

        run_with_retry(
            self.max_attempts,
            |_attempt| invoke(self.adapter, &request, self.executor.as_ref()),
            validate,
        )
        .await
    }
}

impl std::fmt::Debug for AgentRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentRunner")
            .field("command", &self.adapter.command())
            .field("max_attempts", &self.max_attempts)
            .field("verbose", &self.verbose)
            .finish()
    }
}
