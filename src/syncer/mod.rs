//! Bidirectional reconciliation between the shared service and a local
//! clipboard.
//!
//! Two pumps run on their own threads:
//! - remote-to-local: service subscribe stream -> local clipboard write
//! - local-to-remote: clipboard watcher -> service push
//!
//! Each pump attempt is built fresh, runs until it fails or observes
//! cancellation, and is restarted by a supervisor with exponential backoff.
//! Cancellation is never reported as a failure.
//!
//! # Example
//!
//! ```ignore
//! let service = Arc::new(ClipboardService::default());
//! let clipboard = Arc::new(MemoryClipboard::new());
//!
//! let handle = Syncer::new(service, clipboard, ClipConfig::default()).start()?;
//! // ...
//! handle.cancel();
//! handle.wait();
//! ```

mod backoff;
mod pump;
mod runner;
mod streams;
mod supervisor;

pub use backoff::Backoff;
pub use pump::{consume, Direction, Pump, Step};
pub use runner::{Syncer, SyncerHandle};
pub use streams::{InputStream, LocalInput, LocalOutput, OutputStream, RemoteInput, RemoteOutput};
pub use supervisor::{supervise, SupervisorReport};
