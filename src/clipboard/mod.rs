//! Local clipboard access.
//!
//! The OS binding is a collaborator: anything implementing [`Clipboard`]
//! can back the reconciliation loop. [`MemoryClipboard`] is an in-process
//! implementation for tests and headless hosts, and [`ClipboardWatcher`]
//! turns any clipboard into a stream of changes by polling it.

mod memory;
mod watcher;

pub use memory::MemoryClipboard;
pub use watcher::ClipboardWatcher;

use crate::error::Result;
use crate::types::ClipValue;

/// Read/write access to a native clipboard.
pub trait Clipboard: Send + Sync {
    /// Current contents. An empty clipboard reads as an empty value.
    fn read(&self) -> Result<ClipValue>;

    /// Replace the contents.
    fn write(&self, value: &ClipValue) -> Result<()>;

    /// Whether the platform clipboard can be used at all.
    ///
    /// Checked once before local pumps start.
    fn is_supported(&self) -> bool {
        true
    }
}
