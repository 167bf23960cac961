//! Channel-backed presentation context.
//!
//! `MainThreadHandle` may be cloned into any thread; `MainLoop` stays on the
//! presentation thread and is the only place posted closures run.

use super::{MainTask, MainThread};
use log::warn;
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

/// Creates a connected handle/loop pair.
pub fn main_loop() -> (MainThreadHandle, MainLoop) {
    let (sender, receiver) = channel();
    (MainThreadHandle { sender }, MainLoop { receiver })
}

/// Sending half, handed to interactors.
#[derive(Clone)]
pub struct MainThreadHandle {
    sender: Sender<MainTask>,
}

impl MainThread for MainThreadHandle {
    fn post(&self, task: MainTask) {
        if self.sender.send(task).is_err() {
            warn!("event=main_thread_post module=executor status=dropped reason=loop_closed");
        }
    }
}

/// Receiving half, drained by the presentation thread.
pub struct MainLoop {
    receiver: Receiver<MainTask>,
}

impl MainLoop {
    /// Runs every task posted so far without blocking; returns how many ran.
    pub fn run_pending(&self) -> usize {
        let mut ran = 0;
        while let Ok(task) = self.receiver.try_recv() {
            task();
            ran += 1;
        }
        ran
    }

    /// Waits up to `timeout` for one task and runs it.
    ///
    /// Returns `false` on timeout or when every handle is gone.
    pub fn run_next(&self, timeout: Duration) -> bool {
        match self.receiver.recv_timeout(timeout) {
            Ok(task) => {
                task();
                true
            }
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::main_loop;
    use crate::executor::MainThread;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn posted_tasks_run_only_when_drained() {
        let (handle, main) = main_loop();
        let counter = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            let counter = Arc::clone(&counter);
            handle.post(Box::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }));
        }
        assert_eq!(counter.load(Ordering::SeqCst), 0);

        assert_eq!(main.run_pending(), 3);
        assert_eq!(counter.load(Ordering::SeqCst), 3);
        assert!(!main.run_next(Duration::from_millis(10)));
    }
}
