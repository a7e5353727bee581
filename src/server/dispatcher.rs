//! The worker pool that executes every server task.
//!
//! A configurable number of worker threads drain one shared queue of ready
//! futures; idle workers block until work arrives and exit when the pool is
//! dropped. Room actors, sessions, and outbound writers all run here.

use futures::executor::ThreadPool;
use futures::Future;

use crate::utils::ChatResult;

/// A handle on the shared worker pool. Cloning is cheap; all clones spawn
/// onto the same workers.
#[derive(Clone)]
pub struct Dispatcher {
    pool: ThreadPool,
}

impl Dispatcher {
    /// Start a pool of `workers` threads (at least one).
    pub fn new(workers: usize) -> ChatResult<Dispatcher> {
        let pool = ThreadPool::builder()
            .pool_size(workers.max(1))
            .name_prefix("worker-")
            .after_start(|id| tracing::debug!(worker = id, "worker started"))
            .before_stop(|id| tracing::debug!(worker = id, "worker stopping"))
            .create()?;

        Ok(Dispatcher { pool })
    }

    /// Run `future` to completion on one of the workers.
    pub fn spawn<F>(&self, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.pool.spawn_ok(future);
    }
}
