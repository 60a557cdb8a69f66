use std::future::Future;

use tracing::{debug, warn};

use super::error::{AgentError, Result};

/// Calls `invoke` until `validate` accepts its output or `max_attempts` is spent.
///
/// Every failure counts against the budget, whether the process could not be
/// started, exited nonzero, or answered with something that does not fit the
/// expected shape. Attempts run one after another with no delay. `invoke`
/// receives the 0-based attempt index.
pub async fn run_with_retry<T, P, F, Fut, V>(
    max_attempts: usize,
    mut invoke: F,
    validate: V,
) -> Result<T>
where
    F: FnMut(usize) -> Fut,
    Fut: Future<Output = Result<P>>,
    V: Fn(P) -> Result<T>,
{
    let max_attempts = max_attempts.max(1);
    let mut errors = Vec::new();

    for attempt in 0..max_attempts {
        let outcome = invoke(attempt).await.and_then(&validate);
        match outcome {
            Ok(value) => {
                if attempt > 0 {
                    debug!(attempt = attempt + 1, "Agent call succeeded after retry");
                }
                return Ok(value);
            }
            Err(err) => {
                let kind = if err.is_process_failure() {
                    "process"
                } else {
                    "response"
                };
                warn!(
                    attempt = attempt + 1,
                    max_attempts,
                    "Agent {kind} failure: {err}"
                );
                errors.push(err);
            }
        }
    }

    Err(AgentError::RetryExhausted {
        attempts: max_attempts,
        errors,
    })
}
