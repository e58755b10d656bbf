//! Trailing-edge debounce on the tokio timer.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use std::time::Duration;
use tokio::runtime::{Builder, Handle, Runtime};
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, trace, warn};

type Action = Arc<dyn Fn() + Send + Sync>;

/// Timer runtime for calls made outside any tokio runtime
static TIMER_RUNTIME: OnceLock<Option<Runtime>> = OnceLock::new();

fn timer_handle() -> Option<Handle> {
    if let Ok(handle) = Handle::try_current() {
        return Some(handle);
    }

    TIMER_RUNTIME
        .get_or_init(|| {
            debug!("Starting background runtime for debounce timers");
            Builder::new_multi_thread()
                .worker_threads(1)
                .thread_name("translator-debounce")
                .enable_time()
                .build()
                .map_err(|e| warn!("Failed to start debounce timer runtime: {}", e))
                .ok()
        })
        .as_ref()
        .map(|runtime| runtime.handle().clone())
}

/// Coalesces bursts of calls into one trailing invocation.
///
/// Every [`call`](Self::call) restarts the timer; the action runs once the
/// interval elapses without further calls. A zero interval runs the action
/// synchronously. Timers run on the caller's tokio runtime, or on a shared
/// background runtime when called from plain threads.
pub(crate) struct Debouncer {
    delay: Duration,
    action: Action,
    pending: Mutex<Option<JoinHandle<()>>>,
    cancelled: AtomicBool,
}

impl Debouncer {
    pub(crate) fn new(delay: Duration, action: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            delay,
            action: Arc::new(action),
            pending: Mutex::new(None),
            cancelled: AtomicBool::new(false),
        }
    }

    pub(crate) fn call(&self) {
        if self.cancelled.load(Ordering::SeqCst) {
            return;
        }

        if self.delay.is_zero() {
            (self.action)();
            return;
        }

        let Some(runtime) = timer_handle() else {
            warn!(
                "No timer runtime available, delivering change notification without {:?} debounce",
                self.delay
            );
            (self.action)();
            return;
        };

        let action = Arc::clone(&self.action);
        let delay = self.delay;
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = pending.take() {
            trace!("Restarting debounce timer");
            previous.abort();
        }
        *pending = Some(runtime.spawn(async move {
            sleep(delay).await;
            action();
        }));
    }

    /// Drop any pending invocation and ignore future calls. Idempotent.
    pub(crate) fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
        if let Some(pending) = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            pending.abort();
        }
    }
}
