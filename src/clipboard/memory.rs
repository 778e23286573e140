//! In-memory clipboard.

use super::Clipboard;
use crate::error::{ClipError, Result};
use crate::types::ClipValue;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Clipboard held in process memory.
///
/// Supports failure injection so callers can exercise their error paths.
pub struct MemoryClipboard {
    contents: Mutex<ClipValue>,
    supported: AtomicBool,
    /// Number of upcoming reads that fail.
    failing_reads: AtomicUsize,
    /// Number of upcoming writes that fail.
    failing_writes: AtomicUsize,
    reads: AtomicUsize,
    writes: AtomicUsize,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::with_contents(ClipValue::default())
    }

    pub fn with_contents(value: impl Into<ClipValue>) -> Self {
        Self {
            contents: Mutex::new(value.into()),
            supported: AtomicBool::new(true),
            failing_reads: AtomicUsize::new(0),
            failing_writes: AtomicUsize::new(0),
            reads: AtomicUsize::new(0),
            writes: AtomicUsize::new(0),
        }
    }

    /// Replace the contents as a user copy would, without counting a write.
    pub fn set(&self, value: impl Into<ClipValue>) {
        *self.contents.lock() = value.into();
    }

    pub fn contents(&self) -> ClipValue {
        self.contents.lock().clone()
    }

    pub fn set_supported(&self, supported: bool) {
        self.supported.store(supported, Ordering::SeqCst);
    }

    /// Make the next `n` reads fail.
    pub fn fail_next_reads(&self, n: usize) {
        self.failing_reads.store(n, Ordering::SeqCst);
    }

    /// Make the next `n` writes fail.
    pub fn fail_next_writes(&self, n: usize) {
        self.failing_writes.store(n, Ordering::SeqCst);
    }

    /// Successful reads so far.
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn take_failure(counter: &AtomicUsize) -> bool {
        counter
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

impl Default for MemoryClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Clipboard for MemoryClipboard {
    fn read(&self) -> Result<ClipValue> {
        if Self::take_failure(&self.failing_reads) {
            return Err(ClipError::Clipboard("injected read failure".to_string()));
        }
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.contents.lock().clone())
    }

    fn write(&self, value: &ClipValue) -> Result<()> {
        if Self::take_failure(&self.failing_writes) {
            return Err(ClipError::Clipboard("injected write failure".to_string()));
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        *self.contents.lock() = value.clone();
        Ok(())
    }

    fn is_supported(&self) -> bool {
        self.supported.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_write() {
        let clipboard = MemoryClipboard::new();
        assert!(clipboard.read().unwrap().is_empty());

        clipboard.write(&ClipValue::from("x")).unwrap();
        assert_eq!(clipboard.read().unwrap(), ClipValue::from("x"));
        assert_eq!(clipboard.write_count(), 1);
        assert_eq!(clipboard.read_count(), 2);
    }

    #[test]
    fn test_injected_failures_are_consumed() {
        let clipboard = MemoryClipboard::with_contents("x");
        clipboard.fail_next_reads(2);

        assert!(matches!(clipboard.read(), Err(ClipError::Clipboard(_))));
        assert!(matches!(clipboard.read(), Err(ClipError::Clipboard(_))));
        assert_eq!(clipboard.read().unwrap(), ClipValue::from("x"));

        clipboard.fail_next_writes(1);
        assert!(clipboard.write(&ClipValue::from("y")).is_err());
        assert_eq!(clipboard.contents(), ClipValue::from("x"));
    }

    #[test]
    fn test_supported_flag() {
        let clipboard = MemoryClipboard::new();
        assert!(clipboard.is_supported());
        clipboard.set_supported(false);
        assert!(!clipboard.is_supported());
    }
}
