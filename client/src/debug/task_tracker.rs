//! Async task lifecycle tracking for background loops

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use tokio::task::JoinHandle;

static NEXT_TASK_ID: AtomicU64 = AtomicU64::new(1);
static ACTIVE_TASKS: AtomicU64 = AtomicU64::new(0);

/// Get current number of active tracked tasks
pub fn active_task_count() -> u64 {
    ACTIVE_TASKS.load(Ordering::Relaxed)
}

/// Decrements the active count however the task ends, abort included.
struct TaskGuard {
    name: &'static str,
    task_id: u64,
    start: Instant,
    completed: bool,
}

impl Drop for TaskGuard {
    fn drop(&mut self) {
        ACTIVE_TASKS.fetch_sub(1, Ordering::Relaxed);
        let duration_ms = self.start.elapsed().as_millis();
        if self.completed {
            tracing::debug!(
                task = %self.name,
                task_id = self.task_id,
                duration_ms,
                "Task completed"
            );
        } else {
            tracing::debug!(
                task = %self.name,
                task_id = self.task_id,
                duration_ms,
                "Task cancelled"
            );
        }
    }
}

/// Spawn an instrumented async task with lifecycle tracking
///
/// # Example
///
/// ```rust,no_run
/// # async fn demo() {
/// use fks_client::debug::spawn_tracked;
///
/// let handle = spawn_tracked("clock_loop", async move {
///     tokio::time::sleep(std::time::Duration::from_secs(1)).await;
/// });
/// handle.abort();
/// # }
/// ```
pub fn spawn_tracked<F>(name: &'static str, future: F) -> JoinHandle<F::Output>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    let task_id = NEXT_TASK_ID.fetch_add(1, Ordering::Relaxed);
    ACTIVE_TASKS.fetch_add(1, Ordering::Relaxed);

    tracing::debug!(task = %name, task_id, "Task spawned");

    let mut guard = TaskGuard {
        name,
        task_id,
        start: Instant::now(),
        completed: false,
    };

    tokio::spawn(async move {
        let result = future.await;
        guard.completed = true;
        drop(guard);
        result
    })
}
