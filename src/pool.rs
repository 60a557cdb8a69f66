//! Bounded worker pool over a shared cursor.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures::future::try_join_all;

/// Runs `task` for every item with at most `concurrency` calls in flight.
///
/// Results come back in input order regardless of completion order. The
/// first error is returned as-is and the remaining results are dropped;
/// calls already in flight are not interrupted beyond dropping their futures.
pub async fn run_with_concurrency<T, R, E, F, Fut>(
    items: &[T],
    concurrency: usize,
    task: F,
) -> Result<Vec<R>, E>
where
    F: Fn(usize, &T) -> Fut,
    Fut: Future<Output = Result<R, E>>,
{
    if items.is_empty() {
        return Ok(Vec::new());
    }

    let workers = concurrency.max(1).min(items.len());
    let cursor = AtomicUsize::new(0);

    let worker = |_id: usize| {
        let cursor = &cursor;
        let task = &task;
        async move {
            let mut finished = Vec::new();
            loop {
                let index = cursor.fetch_add(1, Ordering::Relaxed);
                let Some(item) = items.get(index) else {
                    break;
                };
                finished.push((index, task(index, item).await?));
            }
            Ok::<_, E>(finished)
        }
    };

    let batches = try_join_all((0..workers).map(worker)).await?;

    let mut slots: Vec<Option<R>> = (0..items.len()).map(|_| None).collect();
    for (index, result) in batches.into_iter().flatten() {
        slots[index] = Some(result);
    }

    Ok(slots.into_iter().flatten().collect())
}
