//! Cancellation token.

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender, TryRecvError};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

struct Inner {
    /// Dropped on cancel. Nothing is ever sent through it.
    trigger: Mutex<Option<Sender<()>>>,
    signal: Receiver<()>,
}

/// Shared cancellation signal.
///
/// Cancelling drops the only sender of an internal channel, so every
/// receiver (including ones parked in `select!`) wakes immediately.
#[derive(Clone)]
pub struct CancelToken {
    inner: Arc<Inner>,
}

impl CancelToken {
    pub fn new() -> Self {
        let (trigger, signal) = bounded(0);
        Self {
            inner: Arc::new(Inner {
                trigger: Mutex::new(Some(trigger)),
                signal,
            }),
        }
    }

    /// Fire the token. Calling it again has no effect.
    pub fn cancel(&self) {
        self.inner.trigger.lock().take();
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self.inner.signal.try_recv(), Err(TryRecvError::Disconnected))
    }

    /// Block until cancelled or `timeout` elapses. Returns true if cancelled.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        matches!(
            self.inner.signal.recv_timeout(timeout),
            Err(RecvTimeoutError::Disconnected)
        )
    }

    /// Block until cancelled.
    pub fn wait(&self) {
        let _ = self.inner.signal.recv();
    }

    /// Receiver that becomes ready (disconnected) once cancelled.
    /// Use it as a `recv` arm in `crossbeam_channel::select!`.
    pub fn receiver(&self) -> &Receiver<()> {
        &self.inner.signal
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CancelToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancelToken")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}
