use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use tracing::warn;

use qc_core::ports::HotkeyError;

/// Cooperative stop signal handed to a worker loop.
#[derive(Clone)]
pub(crate) struct StopFlag(Arc<AtomicBool>);

impl StopFlag {
    pub(crate) fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// A named background thread that polls until asked to stop.
pub(crate) struct Worker {
    name: &'static str,
    stop: StopFlag,
    join: JoinHandle<()>,
}

impl Worker {
    pub(crate) fn spawn<F>(name: &'static str, body: F) -> Result<Self, HotkeyError>
    where
        F: FnOnce(StopFlag) + Send + 'static,
    {
        let stop = StopFlag(Arc::new(AtomicBool::new(false)));
        let thread_stop = stop.clone();
        let join = std::thread::Builder::new()
            .name(name.to_string())
            .spawn(move || body(thread_stop))
            .map_err(|e| HotkeyError::Unavailable(format!("spawn {name}: {e}")))?;
        Ok(Self { name, stop, join })
    }

    /// Signal the loop and wait for it to exit.
    pub(crate) fn stop(self) {
        self.stop.0.store(true, Ordering::Relaxed);
        if self.join.join().is_err() {
            warn!(worker = self.name, "Worker thread panicked");
        }
    }
}
