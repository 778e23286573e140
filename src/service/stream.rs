//! Subscribe streams.

use crate::error::{ClipError, Result};
use crate::shutdown::CancelToken;
use crate::subscriptions::{SubscriptionHandle, SubscriptionId, SubscriptionManager};
use crate::types::ClipValue;
use crossbeam_channel::Sender;
use std::sync::Arc;
use std::time::Duration;

/// A live subscription to the service.
///
/// The first item is the service's latest value at subscribe time (absent
/// if nothing was pushed yet). Every later item is a newly accepted value.
/// Dropping the stream unsubscribes it.
pub struct ValueStream {
    first: Option<Option<ClipValue>>,
    handle: SubscriptionHandle,
    notifier: Arc<SubscriptionManager>,
}

impl ValueStream {
    pub(crate) fn new(
        current: Option<ClipValue>,
        handle: SubscriptionHandle,
        notifier: Arc<SubscriptionManager>,
    ) -> Self {
        Self {
            first: Some(current),
            handle,
            notifier,
        }
    }

    pub fn id(&self) -> SubscriptionId {
        self.handle.id
    }

    /// Next item (blocking).
    pub fn recv(&mut self) -> Result<Option<ClipValue>> {
        if let Some(first) = self.first.take() {
            return Ok(first);
        }
        self.handle.recv().map(Some)
    }

    /// Next item, or `Cancelled` once `cancel` fires.
    pub fn recv_cancellable(&mut self, cancel: &CancelToken) -> Result<Option<ClipValue>> {
        if cancel.is_cancelled() {
            return Err(ClipError::Cancelled);
        }
        if let Some(first) = self.first.take() {
            return Ok(first);
        }
        self.handle.recv_cancellable(cancel).map(Some)
    }

    /// Next item, or `Timeout` if none arrives within `timeout`.
    pub fn recv_timeout(&mut self, timeout: Duration) -> Result<Option<ClipValue>> {
        if let Some(first) = self.first.take() {
            return Ok(first);
        }
        match self.handle.recv_timeout(timeout)? {
            Some(value) => Ok(Some(value)),
            None => Err(ClipError::Timeout),
        }
    }
}

impl Drop for ValueStream {
    fn drop(&mut self) {
        self.notifier.unsubscribe(self.handle.id);
    }
}

/// Outbound half of a subscribe stream, as provided by a transport.
pub trait StreamSink {
    /// Send one item to the remote subscriber.
    fn send(&mut self, value: Option<&ClipValue>) -> Result<()>;
}

impl StreamSink for Sender<Option<ClipValue>> {
    fn send(&mut self, value: Option<&ClipValue>) -> Result<()> {
        Sender::send(self, value.cloned())
            .map_err(|_| ClipError::Transport("stream receiver disconnected".to_string()))
    }
}
