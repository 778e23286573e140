//! Fan-out notifier for live clipboard updates.
//!
//! Every value published while a subscription is registered is delivered to
//! it exactly once and in publish order. Subscriptions buffer a bounded
//! number of values; a subscriber that falls behind is disconnected rather
//! than allowed to stall the publisher.
//!
//! # Example
//!
//! ```ignore
//! let manager = SubscriptionManager::new();
//! let handle = manager.subscribe();
//!
//! manager.publish(&ClipValue::from("hello"));
//!
//! loop {
//!     match handle.recv() {
//!         Ok(value) => println!("Got {} bytes", value.len()),
//!         Err(_) => break,
//!     }
//! }
//! ```

mod manager;
mod types;

pub use manager::SubscriptionManager;
pub use types::{ClipEvent, DropReason, SubscriptionConfig, SubscriptionHandle, SubscriptionId};
