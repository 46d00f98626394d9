// src/crawl/pool.rs
// =============================================================================
// A fixed-size worker pool between two bounded queues.
//
//   producer ──jobs──▶ [worker 0..N] ──results──▶ consumer
//
// - The job receiver is shared behind a tokio Mutex, so every queued job is
//   handed to exactly one worker (no broadcast).
// - A worker exits when the job queue is closed AND drained, or when the
//   consumer has gone away (the result send fails).
// - A supervisor task waits for every worker, then drops the last result
//   sender. That closes the result queue and ends the consumer's loop.
//
// Shutdown is therefore a cascade: producer drops its sender, workers drain
// and exit, supervisor closes results, consumer sees None.
// =============================================================================

use std::future::Future;
use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, error};

use crate::error::{CrawlError, JobOutcome};

// Starts `workers` tasks that apply `handler` to every job and returns the
// receiving end of the result queue
//
// Must be called from inside a tokio runtime.
pub fn run_pool<J, T, F, Fut>(
    jobs: mpsc::Receiver<J>,
    workers: usize,
    capacity: usize,
    handler: F,
) -> mpsc::Receiver<JobOutcome<T>>
where
    J: Send + 'static,
    T: Send + 'static,
    F: Fn(J) -> Fut + Clone + Send + 'static,
    Fut: Future<Output = JobOutcome<T>> + Send + 'static,
{
    let (result_tx, result_rx) = mpsc::channel(capacity);
    let jobs = Arc::new(Mutex::new(jobs));

    let handles = (0..workers)
        .map(|worker| {
            let jobs = Arc::clone(&jobs);
            let results = result_tx.clone();
            let handler = handler.clone();

            tokio::spawn(async move {
                loop {
                    // The lock is held only while waiting for the next job
                    let job = {
                        let mut rx = jobs.lock().await;
                        rx.recv().await
                    };
                    let Some(job) = job else { break };

                    let outcome = handler(job).await;
                    if results.send(outcome).await.is_err() {
                        debug!(worker, "result queue closed, stopping");
                        break;
                    }
                }
                debug!(worker, "worker finished");
            })
        })
        .collect();

    close_when_done(handles, result_tx);
    result_rx
}

// Waits for every task, then drops `results` so the queue closes once the
// tasks' own sender clones are gone too. A panicked task is reported to the
// consumer as a failed job.
pub fn close_when_done<T>(handles: Vec<JoinHandle<()>>, results: mpsc::Sender<JobOutcome<T>>)
where
    T: Send + 'static,
{
    tokio::spawn(async move {
        for joined in join_all(handles).await {
            if let Err(e) = joined {
                error!(error = %e, "crawl task failed");
                let _ = results.send(Err(CrawlError::WorkerPanicked(e.to_string()))).await;
            }
        }
    });
}
