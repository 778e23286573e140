//! Subscription manager for broadcasting clipboard values.

use crate::types::ClipValue;
use crossbeam_channel::{bounded, Receiver, Sender};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};

use super::types::{ClipEvent, DropReason, SubscriptionConfig, SubscriptionHandle, SubscriptionId};

/// Internal subscription state.
struct Subscription {
    sender: Sender<ClipEvent>,
    /// Second receiver on the same channel, used to discard undelivered
    /// values when the subscription is closed.
    drain: Receiver<ClipEvent>,
}

impl Subscription {
    /// The notifier holds `drain`, so the channel never disconnects and a
    /// failed send always means the buffer is full.
    fn try_send(&self, event: ClipEvent) -> bool {
        self.sender.try_send(event).is_ok()
    }

    /// Discard anything still buffered, optionally leave a final `Dropped`
    /// event, then drop the sender so the receiver observes closure.
    fn close(self, reason: Option<DropReason>) {
        while self.drain.try_recv().is_ok() {}
        if let Some(reason) = reason {
            let _ = self.sender.try_send(ClipEvent::Dropped { reason });
        }
    }
}

/// Fan-out notifier: delivers each published value to every live subscription.
///
/// Each subscription owns a bounded buffer. A subscriber whose buffer is
/// full when a value is published is disconnected with
/// [`DropReason::BufferOverflow`], so a stalled consumer never blocks the
/// publisher or the other subscribers.
pub struct SubscriptionManager {
    /// Active subscriptions by ID.
    subscriptions: RwLock<HashMap<SubscriptionId, Subscription>>,
    /// Counter for generating subscription IDs.
    next_id: AtomicU64,
    config: SubscriptionConfig,
}

impl SubscriptionManager {
    /// Create a new subscription manager.
    pub fn new() -> Self {
        Self::with_config(SubscriptionConfig::default())
    }

    /// Create a new subscription manager with a custom per-subscriber buffer.
    pub fn with_config(config: SubscriptionConfig) -> Self {
        Self {
            subscriptions: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
            config: SubscriptionConfig {
                buffer_size: config.buffer_size.max(1),
            },
        }
    }

    /// Register a new subscription.
    pub fn subscribe(&self) -> SubscriptionHandle {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::SeqCst));
        let (sender, receiver) = bounded(self.config.buffer_size);

        let subscription = Subscription {
            sender,
            drain: receiver.clone(),
        };

        self.subscriptions.write().insert(id, subscription);
        debug!(subscription = id.0, "subscription registered");

        SubscriptionHandle { id, receiver }
    }

    /// Remove a subscription and close its conduit.
    ///
    /// Idempotent. After this returns, no publish reaches the subscription
    /// and every receive on its handle reports closure.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        let removed = self.subscriptions.write().remove(&id);
        if let Some(sub) = removed {
            sub.close(None);
            debug!(subscription = id.0, "subscription removed");
        }
    }

    /// Get subscription count.
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.read().len()
    }

    /// Deliver `value` to every live subscription. Returns how many received it.
    ///
    /// Runs under the read lock, so a concurrent `unsubscribe` either
    /// completes before this observes the set or waits until delivery is done.
    pub fn publish(&self, value: &ClipValue) -> usize {
        let mut delivered = 0;
        let mut to_remove = Vec::new();

        {
            let subs = self.subscriptions.read();
            for (id, sub) in subs.iter() {
                let event = ClipEvent::Value {
                    value: value.clone(),
                };
                if sub.try_send(event) {
                    delivered += 1;
                } else {
                    to_remove.push(*id);
                }
            }
        }

        if !to_remove.is_empty() {
            let mut subs = self.subscriptions.write();
            for id in to_remove {
                if let Some(sub) = subs.remove(&id) {
                    warn!(subscription = id.0, "dropping subscriber: buffer overflow");
                    sub.close(Some(DropReason::BufferOverflow));
                }
            }
        }

        delivered
    }
}

impl Default for SubscriptionManager {
    fn default() -> Self {
        Self::new()
    }
}
