//! Wiring of the core seams for one CLI process.
//!
//! The process main thread is the presentation context: it owns the
//! `MainLoop` and is the only thread that runs callbacks.

use anyhow::{anyhow, bail, Context, Result};
use log::info;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use todokit_core::{
    main_loop, CoreConfig, Executor, FailureHandler, InteractorError, MainLoop, MainThread,
    SqliteTodoListRepository, ThreadPoolExecutor, TodoListRepository,
};

const CALLBACK_TIMEOUT: Duration = Duration::from_secs(10);

/// Value handed from a callback to the waiting main thread.
pub type Slot<T> = Arc<Mutex<Option<T>>>;

pub struct Session {
    pub repository: Arc<dyn TodoListRepository>,
    pub executor: Arc<dyn Executor>,
    pub main_thread: Arc<dyn MainThread>,
    main_loop: MainLoop,
    failure: Slot<String>,
}

impl Session {
    pub fn start(config: &CoreConfig) -> Result<Self> {
        let path = config
            .database_path
            .as_ref()
            .context("no database configured")?;
        let repository: Arc<dyn TodoListRepository> = Arc::new(
            SqliteTodoListRepository::open(path)
                .with_context(|| format!("cannot open database `{}`", path.display()))?,
        );

        let (handle, main_loop) = main_loop();
        let failure: Slot<String> = Arc::new(Mutex::new(None));
        let executor = ThreadPoolExecutor::with_failure_handler(
            config.worker_threads,
            failure_handler(handle.clone(), Arc::clone(&failure)),
        )
        .context("cannot start worker threads")?;
        info!(
            "event=cli_start module=cli status=ok workers={} storage=sqlite",
            executor.worker_count()
        );

        Ok(Self {
            repository,
            executor: Arc::new(executor),
            main_thread: Arc::new(handle),
            main_loop,
            failure,
        })
    }

    /// Drains the main loop until `slot` is filled or a failure arrives.
    pub fn wait_for<T>(&self, slot: &Slot<T>) -> Result<T> {
        let deadline = Instant::now() + CALLBACK_TIMEOUT;
        loop {
            if let Some(message) = take(&self.failure)? {
                bail!(message);
            }
            if let Some(value) = take(slot)? {
                return Ok(value);
            }
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() || !self.main_loop.run_next(remaining) {
                bail!(
                    "no result within {} seconds",
                    CALLBACK_TIMEOUT.as_secs()
                );
            }
        }
    }
}

pub fn slot<T>() -> Slot<T> {
    Arc::new(Mutex::new(None))
}

/// Callback body filling `slot`.
pub fn deliver<T>(slot: &Slot<T>) -> impl Fn(T) + Send + Sync + 'static
where
    T: Send + 'static,
{
    let slot = Arc::clone(slot);
    move |value| {
        if let Ok(mut slot) = slot.lock() {
            *slot = Some(value);
        }
    }
}

fn take<T>(slot: &Slot<T>) -> Result<Option<T>> {
    let mut slot = slot.lock().map_err(|_| anyhow!("result slot poisoned"))?;
    Ok(slot.take())
}

fn failure_handler(main_thread: impl MainThread + 'static, failure: Slot<String>) -> FailureHandler {
    Arc::new(move |name: &'static str, err: InteractorError| {
        let failure = Arc::clone(&failure);
        let message = format!("{name} failed ({}): {err}", err.kind());
        main_thread.post(Box::new(move || {
            if let Ok(mut slot) = failure.lock() {
                *slot = Some(message);
            }
        }));
    })
}
