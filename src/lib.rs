//! # RClip
//!
//! A shared remote clipboard: one authoritative value plus a bounded
//! history, fanned out to any number of clients and reconciled with each
//! client's local clipboard.
//!
//! ## Core Concepts
//!
//! - **History**: ring buffer of accepted values, newest first
//! - **Subscriptions**: bounded per-subscriber fan-out of accepted values
//! - **Service**: push/get/hist/subscribe over history and subscriptions
//! - **Syncer**: two restartable pumps between the service and a local clipboard
//!
//! ## Example
//!
//! ```ignore
//! use rclip::{ClipConfig, ClipboardService, MemoryClipboard, Syncer};
//! use std::sync::Arc;
//!
//! let config = ClipConfig::from_json(r#"{"history_size": 50}"#)?;
//! let service = Arc::new(ClipboardService::new(&config));
//!
//! // Every client keeps its clipboard in sync with the service
//! let handle = Syncer::new(service.clone(), Arc::new(MemoryClipboard::new()), config).start()?;
//!
//! service.push("hello".into());
//! assert_eq!(service.hist()[0], "hello".into());
//!
//! handle.cancel();
//! handle.wait();
//! ```

pub mod clipboard;
pub mod config;
pub mod error;
pub mod history;
pub mod service;
pub mod shutdown;
pub mod subscriptions;
pub mod syncer;
pub mod types;

// Re-exports
pub use clipboard::{Clipboard, ClipboardWatcher, MemoryClipboard};
pub use config::{BackoffConfig, ClipConfig};
pub use error::{ClipError, Result};
pub use history::HistoryStore;
pub use service::{ClipboardApi, ClipboardService, StreamSink, ValueStream};
pub use shutdown::{CancelToken, Grace, GraceOutcome};
pub use subscriptions::{
    ClipEvent, DropReason, SubscriptionConfig, SubscriptionHandle, SubscriptionId,
    SubscriptionManager,
};
pub use syncer::{
    consume, supervise, Backoff, Direction, InputStream, LocalInput, LocalOutput, OutputStream,
    Pump, RemoteInput, RemoteOutput, Step, SupervisorReport, Syncer, SyncerHandle,
};
pub use types::*;
