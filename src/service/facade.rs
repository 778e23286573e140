//! In-process clipboard service.

use super::stream::{StreamSink, ValueStream};
use crate::config::ClipConfig;
use crate::error::Result;
use crate::history::HistoryStore;
use crate::shutdown::CancelToken;
use crate::subscriptions::{SubscriptionConfig, SubscriptionManager};
use crate::types::{ClipValue, HistoryEntry, ServiceStats};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, info};

/// The authoritative shared clipboard.
///
/// Owns one history store and one notifier. Pushes are serialized by
/// `push_lock`, so history order and publish order are identical.
pub struct ClipboardService {
    history: HistoryStore,
    notifier: Arc<SubscriptionManager>,
    /// Guards compare-append-publish in `push` and snapshot-register in
    /// `subscribe`.
    push_lock: Mutex<()>,
}

impl ClipboardService {
    pub fn new(config: &ClipConfig) -> Self {
        Self {
            history: HistoryStore::new(config.history_size),
            notifier: Arc::new(SubscriptionManager::with_config(SubscriptionConfig {
                buffer_size: config.subscriber_buffer,
            })),
            push_lock: Mutex::new(()),
        }
    }

    /// Service with default settings and the given history capacity.
    pub fn with_capacity(history_size: usize) -> Self {
        Self::new(&ClipConfig {
            history_size,
            ..Default::default()
        })
    }

    /// Offer a new value.
    ///
    /// Accepted only if non-empty and not byte-equal to the current latest
    /// value; an accepted value is appended to history and published to all
    /// subscribers before the lock is released. Returns whether it was accepted.
    pub fn push(&self, value: ClipValue) -> bool {
        if value.is_empty() {
            debug!("ignoring empty push");
            return false;
        }

        let _lock = self.push_lock.lock();

        if self.history.get().as_ref() == Some(&value) {
            debug!(fingerprint = %value.fingerprint(), "ignoring duplicate push");
            return false;
        }

        let fingerprint = value.fingerprint();
        let len = value.len();
        let ordinal = self.history.push(value.clone());
        let delivered = self.notifier.publish(&value);

        debug!(%ordinal, %fingerprint, len, delivered, "value accepted");
        true
    }

    /// Latest value, or `None` if nothing was pushed yet.
    pub fn get(&self) -> Option<ClipValue> {
        self.history.get()
    }

    /// Retained values, newest first.
    pub fn hist(&self) -> Vec<ClipValue> {
        self.history.get_all()
    }

    /// Retained entries with ordinals, newest first.
    pub fn hist_entries(&self) -> Vec<HistoryEntry> {
        self.history.entries()
    }

    /// Open a subscription.
    ///
    /// The current value is read and the subscription registered under the
    /// push lock, so no push can fall between the two: every value accepted
    /// after the snapshot is delivered exactly once, and none before it.
    pub fn subscribe(&self) -> ValueStream {
        let _lock = self.push_lock.lock();
        let current = self.history.get();
        let handle = self.notifier.subscribe();
        ValueStream::new(current, handle, Arc::clone(&self.notifier))
    }

    /// Serve a subscribe stream to `sink` until `cancel` fires.
    ///
    /// Cancellation ends the stream cleanly. A failed send, or the
    /// subscription being dropped for falling behind, ends it with an error.
    /// The subscription is removed on every exit path.
    pub fn serve(&self, sink: &mut dyn StreamSink, cancel: &CancelToken) -> Result<()> {
        let mut stream = self.subscribe();
        let id = stream.id();
        info!(subscription = id.0, "subscribe stream opened");

        let result = loop {
            let item = match stream.recv_cancellable(cancel) {
                Ok(item) => item,
                Err(e) if e.is_cancelled() => break Ok(()),
                Err(e) => break Err(e),
            };
            if let Err(e) = sink.send(item.as_ref()) {
                break Err(e);
            }
        };

        match &result {
            Ok(()) => info!(subscription = id.0, "subscribe stream closed"),
            Err(e) => info!(subscription = id.0, error = %e, "subscribe stream failed"),
        }
        result
    }

    pub fn stats(&self) -> ServiceStats {
        ServiceStats {
            history_len: self.history.len(),
            capacity: self.history.capacity(),
            total_pushed: self.history.total_pushed(),
            subscribers: self.notifier.subscription_count(),
        }
    }
}

impl Default for ClipboardService {
    fn default() -> Self {
        Self::new(&ClipConfig::default())
    }
}
