//! Fixed-size worker pool executing interactors.

use super::Executor;
use crate::interactor::{Interactor, InteractorError};
use log::{debug, error, warn};
use std::any::Any;
use std::io;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

/// Receives interactor failures that happened on a worker thread, including
/// panicked runs as `InteractorError::Panicked`.
///
/// Called on the worker thread; post to a `MainThread` to surface the error
/// on the presentation context.
pub type FailureHandler = Arc<dyn Fn(&'static str, InteractorError) + Send + Sync>;

type Job = Arc<dyn Interactor>;

/// Background executor backed by named worker threads and one shared queue.
///
/// Dropping the pool closes the queue, lets queued interactors finish and
/// joins every worker. A worker that drops the last handle itself is left to
/// exit on its own.
pub struct ThreadPoolExecutor {
    sender: Option<Sender<Job>>,
    workers: Vec<JoinHandle<()>>,
}

impl ThreadPoolExecutor {
    /// Starts `worker_threads` workers (at least one).
    pub fn new(worker_threads: usize) -> io::Result<Self> {
        Self::start(worker_threads, None)
    }

    /// Starts the pool and forwards every failed run to `handler`.
    pub fn with_failure_handler(worker_threads: usize, handler: FailureHandler) -> io::Result<Self> {
        Self::start(worker_threads, Some(handler))
    }

    /// Number of running worker threads.
    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    fn start(worker_threads: usize, handler: Option<FailureHandler>) -> io::Result<Self> {
        let (sender, receiver) = channel::<Job>();
        let receiver = Arc::new(Mutex::new(receiver));

        let mut workers = Vec::with_capacity(worker_threads.max(1));
        for index in 0..worker_threads.max(1) {
            let receiver = Arc::clone(&receiver);
            let handler = handler.clone();
            let handle = std::thread::Builder::new()
                .name(format!("todokit-worker-{index}"))
                .spawn(move || worker_loop(&receiver, handler.as_ref()))?;
            workers.push(handle);
        }

        debug!(
            "event=executor_start module=executor status=ok workers={}",
            workers.len()
        );
        Ok(Self {
            sender: Some(sender),
            workers,
        })
    }
}

fn worker_loop(receiver: &Mutex<Receiver<Job>>, handler: Option<&FailureHandler>) {
    loop {
        let next = match receiver.lock() {
            Ok(receiver) => receiver.recv(),
            Err(_) => {
                error!("event=executor_worker module=executor status=error error_code=queue_poisoned");
                return;
            }
        };
        let Ok(interactor) = next else {
            return;
        };

        let name = interactor.name();
        let outcome = catch_unwind(AssertUnwindSafe(|| interactor.run())).unwrap_or_else(|payload| {
            Err(InteractorError::Panicked(panic_message(payload.as_ref())))
        });
        if let Err(err) = outcome {
            warn!(
                "event=interactor_failed module=executor status=error interactor={name} kind={} error={err}",
                err.kind()
            );
            if let Some(handler) = handler {
                handler(name, err);
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        return (*message).to_string();
    }
    if let Some(message) = payload.downcast_ref::<String>() {
        return message.clone();
    }
    "non-string panic payload".to_string()
}

impl Executor for ThreadPoolExecutor {
    fn execute(&self, interactor: Arc<dyn Interactor>) {
        let name = interactor.name();
        let sent = self
            .sender
            .as_ref()
            .map(|sender| sender.send(interactor).is_ok())
            .unwrap_or(false);
        if !sent {
            error!(
                "event=executor_submit module=executor status=error interactor={name} error_code=pool_stopped"
            );
        }
    }
}

impl Drop for ThreadPoolExecutor {
    fn drop(&mut self) {
        drop(self.sender.take());
        let current = std::thread::current().id();
        for worker in self.workers.drain(..) {
            if worker.thread().id() == current {
                continue;
            }
            if worker.join().is_err() {
                error!("event=executor_stop module=executor status=error error_code=worker_panicked");
            }
        }
    }
}
