//! Concurrency seam between background work and the presentation thread.
//!
//! # Responsibility
//! - `Executor`: runs interactors off the presentation thread.
//! - `MainThread`: delivers closures onto the single presentation context.
//!
//! # Invariants
//! - Interactors never call back from a worker thread; they post to
//!   `MainThread` instead.
//! - Neither seam assumes a pool size, UI framework or event loop.
//! - Submitted work always runs to completion; there is no cancellation.

use crate::interactor::Interactor;
use std::sync::Arc;

mod main_loop;
mod thread_pool;

pub use main_loop::{main_loop, MainLoop, MainThreadHandle};
pub use thread_pool::{FailureHandler, ThreadPoolExecutor};

/// Closure delivered on the presentation context.
pub type MainTask = Box<dyn FnOnce() + Send + 'static>;

/// Schedules interactors on a background execution context.
pub trait Executor: Send + Sync {
    fn execute(&self, interactor: Arc<dyn Interactor>);
}

/// Posts closures onto the presentation context.
pub trait MainThread: Send + Sync {
    fn post(&self, task: MainTask);
}
