use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::resource::Resource;

use super::cancel::CancellationSignal;
use super::compare::compare;
use super::diff::DriftResult;
use super::filter::FieldFilter;

/// Number of concurrent comparison workers.
pub const MAX_WORKERS: usize = 10;

struct ComparisonTask {
    observed: Resource,
    declared: Arc<Resource>,
}

/// Compares every observed instance against its declaration.
///
/// Results come back in completion order; correlate them by instance id.
/// Observed instances without a declaration yield a forced-drift result
/// without going through a worker. On cancellation, workers stop at their
/// next dequeue and abandoned tasks produce no result, so the returned list
/// may be shorter than `observed`.
pub async fn compare_all(
    observed: Vec<Resource>,
    declared: Vec<Resource>,
    filter: &FieldFilter,
    cancel: &CancellationSignal,
) -> Vec<DriftResult> {
    let total = observed.len();
    let mut results = Vec::with_capacity(total);

    // Duplicate ids: the last declaration wins.
    let index: HashMap<String, Arc<Resource>> = declared
        .into_iter()
        .map(|resource| (resource.instance_id.clone(), Arc::new(resource)))
        .collect();

    let mut tasks = Vec::with_capacity(total);
    for resource in observed {
        if cancel.is_cancelled() {
            tracing::debug!(matched = tasks.len(), "cancelled while matching instances");
            break;
        }

        match index.get(&resource.instance_id) {
            Some(declared) => tasks.push(ComparisonTask {
                observed: resource,
                declared: Arc::clone(declared),
            }),
            None => {
                tracing::debug!(instance_id = %resource.instance_id, "no declared counterpart");
                results.push(DriftResult::missing_declared(resource.instance_id));
            }
        }
    }

    let filter = Arc::new(filter.clone());
    let compared = run_pool(tasks, cancel, move |task: ComparisonTask| {
        let filter = Arc::clone(&filter);
        async move { compare(&task.observed, &task.declared, &filter) }
    })
    .await;
    results.extend(compared);

    tracing::info!(
        observed = total,
        results = results.len(),
        drifted = results.iter().filter(|r| r.drift_detected()).count(),
        "drift comparison finished"
    );

    results
}

/// Runs `job` over `tasks` on [`MAX_WORKERS`] workers sharing one queue.
///
/// Tasks still queued when `cancel` fires are dropped without a result.
async fn run_pool<T, R, F, Fut>(
    tasks: impl IntoIterator<Item = T>,
    cancel: &CancellationSignal,
    job: F,
) -> Vec<R>
where
    T: Send + 'static,
    R: Send + 'static,
    F: Fn(T) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
{
    let (task_tx, task_rx) = async_channel::unbounded();
    let (result_tx, mut result_rx) = mpsc::unbounded_channel();
    let job = Arc::new(job);

    for worker_id in 0..MAX_WORKERS {
        tokio::spawn(run_worker(
            worker_id,
            task_rx.clone(),
            result_tx.clone(),
            Arc::clone(&job),
            cancel.clone(),
        ));
    }
    drop(task_rx);
    drop(result_tx);

    let mut queued = 0usize;
    for task in tasks {
        if cancel.is_cancelled() {
            tracing::debug!(queued, "cancelled while queueing comparisons");
            break;
        }
        if task_tx.try_send(task).is_err() {
            tracing::debug!(queued, "all workers exited before queueing finished");
            break;
        }
        queued += 1;
    }
    drop(task_tx);

    let mut results = Vec::with_capacity(queued);
    while let Some(result) = result_rx.recv().await {
        results.push(result);
    }

    tracing::debug!(queued, completed = results.len(), "worker pool drained");
    results
}

async fn run_worker<T, R, F, Fut>(
    worker_id: usize,
    queue: async_channel::Receiver<T>,
    results: mpsc::UnboundedSender<R>,
    job: Arc<F>,
    cancel: CancellationSignal,
) where
    F: Fn(T) -> Fut,
    Fut: Future<Output = R>,
{
    let mut processed = 0usize;

    loop {
        let task = tokio::select! {
            biased;
            () = cancel.cancelled() => {
                tracing::debug!(worker_id, processed, "worker cancelled");
                return;
            }
            task = queue.recv() => task,
        };

        let Ok(task) = task else {
            break;
        };

        let result = (*job)(task).await;
        processed += 1;

        if results.send(result).is_err() {
            break;
        }
    }

    tracing::debug!(worker_id, processed, "worker drained");
}
