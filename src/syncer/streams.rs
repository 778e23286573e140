//! Input and output ends of a reconciliation pump.

use crate::clipboard::{Clipboard, ClipboardWatcher};
use crate::error::Result;
use crate::service::{ClipboardApi, ValueStream};
use crate::shutdown::CancelToken;
use crate::types::ClipValue;
use std::sync::Arc;
use tracing::{trace, warn};

/// Source of clipboard values.
pub trait InputStream: Send {
    /// Block until the next value. `Ok(None)` is an absent value and is
    /// skipped by the pump. Fails with `Cancelled` on cancellation.
    fn recv(&mut self) -> Result<Option<ClipValue>>;
}

/// Sink for clipboard values.
pub trait OutputStream: Send {
    fn send(&mut self, value: &ClipValue) -> Result<()>;
}

/// Values arriving from the service's subscribe stream.
pub struct RemoteInput {
    stream: ValueStream,
    cancel: CancelToken,
}

impl RemoteInput {
    pub fn new(stream: ValueStream, cancel: CancelToken) -> Self {
        Self { stream, cancel }
    }
}

impl InputStream for RemoteInput {
    fn recv(&mut self) -> Result<Option<ClipValue>> {
        self.stream.recv_cancellable(&self.cancel)
    }
}

/// Values pushed to the service.
pub struct RemoteOutput {
    api: Arc<dyn ClipboardApi>,
}

impl RemoteOutput {
    pub fn new(api: Arc<dyn ClipboardApi>) -> Self {
        Self { api }
    }
}

impl OutputStream for RemoteOutput {
    fn send(&mut self, value: &ClipValue) -> Result<()> {
        self.api.push(value.clone())
    }
}

/// Changes detected on the local clipboard.
///
/// A change that was overwritten before it could be handed on (for example
/// by a remote value written through [`LocalOutput`]) is skipped; the next
/// poll reports the newer contents instead.
pub struct LocalInput {
    watcher: ClipboardWatcher,
}

impl LocalInput {
    pub fn new(watcher: ClipboardWatcher) -> Self {
        Self { watcher }
    }
}

impl InputStream for LocalInput {
    fn recv(&mut self) -> Result<Option<ClipValue>> {
        let value = self.watcher.recv()?;
        if !self.watcher.is_current(&value)? {
            trace!(fingerprint = %value.fingerprint(), "local change superseded");
            return Ok(None);
        }
        Ok(Some(value))
    }
}

/// Writes to the local clipboard.
///
/// A value already on the clipboard is not written again, so a value that
/// came from the local side and echoes back from the service is a no-op.
pub struct LocalOutput {
    clipboard: Arc<dyn Clipboard>,
    /// Last value known to be on the clipboard.
    last: Option<ClipValue>,
}

impl LocalOutput {
    pub fn new(clipboard: Arc<dyn Clipboard>) -> Self {
        Self {
            clipboard,
            last: None,
        }
    }
}

impl OutputStream for LocalOutput {
    fn send(&mut self, value: &ClipValue) -> Result<()> {
        let current = match self.clipboard.read() {
            Ok(current) => Some(current),
            Err(e) => {
                warn!(error = %e, "failed to read local clipboard, using last known value");
                self.last.clone()
            }
        };

        if current.as_ref() == Some(value) {
            trace!(fingerprint = %value.fingerprint(), "local clipboard already up to date");
            self.last = Some(value.clone());
            return Ok(());
        }

        self.clipboard.write(value)?;
        trace!(fingerprint = %value.fingerprint(), "local clipboard updated");
        self.last = Some(value.clone());
        Ok(())
    }
}
