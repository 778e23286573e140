//! Subscription types for live clipboard updates.

use crate::error::{ClipError, Result};
use crate::shutdown::CancelToken;
use crate::types::ClipValue;
use crossbeam_channel::{select, Receiver, RecvTimeoutError, TryRecvError};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for a subscription.
#[derive(Clone, Debug)]
pub struct SubscriptionConfig {
    /// Max buffered values before the subscriber is disconnected.
    /// Default: 16
    pub buffer_size: usize,
}

impl Default for SubscriptionConfig {
    fn default() -> Self {
        Self { buffer_size: 16 }
    }
}

/// Events delivered through a subscription conduit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClipEvent {
    /// A newly accepted clipboard value.
    Value { value: ClipValue },

    /// Subscription was dropped by the notifier. Always the last event.
    Dropped { reason: DropReason },
}

/// Why a subscription was dropped.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    /// Send buffer overflowed (slow consumer).
    BufferOverflow,
}

/// Unique identifier for a subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub u64);

/// Receiving end of a subscription.
///
/// Once the subscription is removed from the notifier every receive
/// reports closure instead of blocking.
pub struct SubscriptionHandle {
    pub id: SubscriptionId,
    /// Channel to receive events.
    pub receiver: Receiver<ClipEvent>,
}

impl SubscriptionHandle {
    /// Receive the next value (blocking).
    pub fn recv(&self) -> Result<ClipValue> {
        match self.receiver.recv() {
            Ok(event) => event_to_value(event),
            Err(_) => Err(ClipError::StreamClosed),
        }
    }

    /// Try to receive a value (non-blocking). `Ok(None)` if nothing is pending.
    pub fn try_recv(&self) -> Result<Option<ClipValue>> {
        match self.receiver.try_recv() {
            Ok(event) => event_to_value(event).map(Some),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(ClipError::StreamClosed),
        }
    }

    /// Receive with timeout. `Ok(None)` if the timeout elapsed.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<Option<ClipValue>> {
        match self.receiver.recv_timeout(timeout) {
            Ok(event) => event_to_value(event).map(Some),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(ClipError::StreamClosed),
        }
    }

    /// Receive the next value or fail with `Cancelled` once `cancel` fires.
    pub fn recv_cancellable(&self, cancel: &CancelToken) -> Result<ClipValue> {
        if cancel.is_cancelled() {
            return Err(ClipError::Cancelled);
        }
        select! {
            recv(self.receiver) -> msg => match msg {
                Ok(event) => event_to_value(event),
                Err(_) => Err(ClipError::StreamClosed),
            },
            recv(cancel.receiver()) -> _ => Err(ClipError::Cancelled),
        }
    }
}

fn event_to_value(event: ClipEvent) -> Result<ClipValue> {
    match event {
        ClipEvent::Value { value } => Ok(value),
        ClipEvent::Dropped { reason } => Err(ClipError::SubscriptionDropped(reason)),
    }
}
