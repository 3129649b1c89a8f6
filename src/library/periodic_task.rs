use std::sync::{Arc, Condvar, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

/// Calls `on_tick` every `interval` on its own thread until cancelled.
///
/// The tick callback runs while holding the cancellation lock, so once
/// [`PeriodicTask::cancel`] returns no further tick can start.
pub struct PeriodicTask {
    shared: Arc<(Mutex<bool>, Condvar)>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl PeriodicTask {
    /// `on_tick` returning `false` ends the task as if it had been cancelled.
    pub fn spawn<F>(interval: Duration, mut on_tick: F) -> Self
    where
        F: FnMut() -> bool + Send + 'static,
    {
        let shared = Arc::new((Mutex::new(false), Condvar::new()));
        let worker_shared = shared.clone();

        let handle = std::thread::spawn(move || {
            let (cancelled, wake) = &*worker_shared;
            let mut guard = cancelled
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());

            loop {
                let (next, _) = wake
                    .wait_timeout_while(guard, interval, |cancelled| !*cancelled)
                    .unwrap_or_else(|poisoned| poisoned.into_inner());
                guard = next;

                if *guard {
                    return;
                }

                if !on_tick() {
                    *guard = true;
                    return;
                }
            }
        });

        Self {
            shared,
            handle: Mutex::new(Some(handle)),
        }
    }

    /// Stops the task. Calling it again is a no-op.
    pub fn cancel(&self) {
        let (cancelled, wake) = &*self.shared;
        let mut guard = cancelled
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if *guard {
            return;
        }
        *guard = true;
        wake.notify_all();
    }

    /// Cancels and waits for the worker thread to exit.
    #[allow(dead_code)]
    pub fn join(&self) {
        self.cancel();
        let handle = self
            .handle
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
        if let Some(handle) = handle {
            let _ = handle.join();
        }
    }
}

impl Drop for PeriodicTask {
    fn drop(&mut self) {
        self.cancel();
    }
}
