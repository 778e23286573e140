//! Streaming service façade over the history store and the notifier.
//!
//! Four operations make up the remote contract: push, get, hist and
//! subscribe. [`ClipboardService`] implements them in process;
//! [`ClipboardApi`] is the same contract as seen by the reconciliation
//! pumps, so a transport client can stand in for the service.

mod api;
mod facade;
mod stream;

pub use api::ClipboardApi;
pub use facade::ClipboardService;
pub use stream::{StreamSink, ValueStream};
