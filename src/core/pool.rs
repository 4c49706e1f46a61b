use crate::utils::error::{EtlError, Result};
use std::any::Any;
use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, PoisonError};

type Slots<T> = Mutex<Vec<Option<Result<T>>>>;

/// Fixed-size pool of blocking workers draining a shared job queue.
///
/// Every worker builds its own state from the factory, so per-worker
/// resources (an NLP annotator, say) are never shared. A job that fails or
/// panics only fails its own slot; after a panic the worker rebuilds its
/// state before taking the next job. Outcomes are stored as soon as a job
/// finishes, so a worker that dies never takes finished results with it.
#[derive(Debug, Clone, Copy)]
pub struct WorkerPool {
    workers: usize,
}

impl WorkerPool {
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Runs every job and returns the outcomes in job order.
    pub async fn run<J, T, W, F>(&self, jobs: Vec<J>, factory: F) -> Vec<Result<T>>
    where
        J: Send + 'static,
        T: Send + 'static,
        W: FnMut(J) -> Result<T>,
        F: Fn() -> W + Send + Sync + 'static,
    {
        let total = jobs.len();
        if total == 0 {
            return Vec::new();
        }

        let queue = Arc::new(Mutex::new(
            jobs.into_iter().enumerate().collect::<VecDeque<_>>(),
        ));
        let slots: Arc<Slots<T>> = Arc::new(Mutex::new((0..total).map(|_| None).collect()));
        let factory = Arc::new(factory);
        let worker_count = self.workers.min(total);
        tracing::debug!("Starting {} worker(s) for {} job(s)", worker_count, total);

        let mut handles = Vec::with_capacity(worker_count);
        for worker_id in 0..worker_count {
            let queue = Arc::clone(&queue);
            let slots = Arc::clone(&slots);
            let factory = Arc::clone(&factory);
            handles.push(tokio::task::spawn_blocking(move || {
                let Some(mut work) = build_worker(factory.as_ref(), worker_id) else {
                    return;
                };

                loop {
                    let next = match queue.lock() {
                        Ok(mut pending) => pending.pop_front(),
                        Err(_) => None,
                    };
                    let Some((index, job)) = next else {
                        break;
                    };

                    match panic::catch_unwind(AssertUnwindSafe(|| work(job))) {
                        Ok(outcome) => store(&slots, index, outcome),
                        Err(payload) => {
                            let message = panic_message(payload.as_ref());
                            tracing::error!("Worker {} panicked on job {}: {}", worker_id, index, message);
                            store(&slots, index, Err(EtlError::WorkerError { message }));

                            match build_worker(factory.as_ref(), worker_id) {
                                Some(rebuilt) => work = rebuilt,
                                None => return,
                            }
                        }
                    }
                }
            }));
        }

        for handle in handles {
            if let Err(e) = handle.await {
                tracing::error!("Worker task failed to join: {}", e);
            }
        }

        let outcomes = std::mem::take(&mut *slots.lock().unwrap_or_else(PoisonError::into_inner));
        outcomes
            .into_iter()
            .map(|slot| {
                slot.unwrap_or_else(|| {
                    Err(EtlError::WorkerError {
                        message: "job was not completed".to_string(),
                    })
                })
            })
            .collect()
    }
}

/// Builds worker state, or `None` when the factory panics. The worker then
/// stops and leaves the remaining jobs to the other workers.
fn build_worker<W, F: Fn() -> W>(factory: &F, worker_id: usize) -> Option<W> {
    match panic::catch_unwind(AssertUnwindSafe(factory)) {
        Ok(work) => Some(work),
        Err(payload) => {
            tracing::error!(
                "Worker {} could not build its state: {}",
                worker_id,
                panic_message(payload.as_ref())
            );
            None
        }
    }
}

fn store<T>(slots: &Slots<T>, index: usize, outcome: Result<T>) {
    let mut slots = slots.lock().unwrap_or_else(PoisonError::into_inner);
    slots[index] = Some(outcome);
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
