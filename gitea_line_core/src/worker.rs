//! Fixed-size pool of worker threads for resolution work that may block.

use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};

use tracing::{debug, error};

use crate::{Error, Result};

type Job = Box<dyn FnOnce() + Send + 'static>;

/// Threads pulling jobs off a shared channel.
///
/// Dropping the pool closes the channel and joins every worker once queued
/// jobs have finished.
pub struct WorkerPool {
    sender: Option<Sender<Job>>,
    workers: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Spawn `size` workers (at least one).
    ///
    /// # Errors
    ///
    /// Returns [`Error::WorkerPool`] when a thread cannot be spawned.
    pub fn new(size: usize) -> Result<Self> {
        let (sender, receiver) = mpsc::channel::<Job>();
        let receiver = Arc::new(Mutex::new(receiver));

        let workers = (0..size.max(1))
            .map(|index| spawn_worker(index, Arc::clone(&receiver)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            sender: Some(sender),
            workers,
        })
    }

    /// Number of worker threads.
    #[must_use]
    pub fn size(&self) -> usize {
        self.workers.len()
    }

    /// Queue `job` for execution on the next free worker.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WorkerDisconnected`] when every worker has exited.
    pub fn execute<F>(&self, job: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        self.sender
            .as_ref()
            .ok_or(Error::WorkerDisconnected)?
            .send(Box::new(job))
            .map_err(|_| Error::WorkerDisconnected)
    }
}

fn spawn_worker(index: usize, receiver: Arc<Mutex<Receiver<Job>>>) -> Result<JoinHandle<()>> {
    thread::Builder::new()
        .name(format!("gitea-line-worker-{index}"))
        .spawn(move || loop {
            let next = receiver
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .recv();
            let Ok(job) = next else {
                debug!(worker = index, "job channel closed");
                break;
            };
            if panic::catch_unwind(AssertUnwindSafe(job)).is_err() {
                error!(worker = index, "job panicked");
            }
        })
        .map_err(|err| Error::WorkerPool {
            message: format!("failed to spawn worker {index}: {err}"),
        })
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        drop(self.sender.take());
        for worker in self.workers.drain(..) {
            let _ = worker.join();
        }
    }
}

impl std::fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerPool")
            .field("workers", &self.workers.len())
            .finish_non_exhaustive()
    }
}
