//! Polling change detector for a local clipboard.

use super::Clipboard;
use crate::error::{ClipError, Result};
use crate::shutdown::CancelToken;
use crate::types::ClipValue;
use std::sync::Arc;
use std::time::Duration;
use tracing::trace;

/// Yields the clipboard contents each time they change.
///
/// Every cycle reads the clipboard and compares it byte-for-byte with the
/// last yielded value (initially empty). Unchanged contents wait for the
/// poll interval or cancellation, whichever comes first.
pub struct ClipboardWatcher {
    clipboard: Arc<dyn Clipboard>,
    interval: Duration,
    cancel: CancelToken,
    previous: ClipValue,
}

impl ClipboardWatcher {
    pub fn new(clipboard: Arc<dyn Clipboard>, interval: Duration, cancel: CancelToken) -> Self {
        Self {
            clipboard,
            interval,
            cancel,
            previous: ClipValue::default(),
        }
    }

    /// Block until the clipboard holds something new.
    ///
    /// Fails with `Cancelled` once the token fires, and with the read error
    /// if the clipboard cannot be read.
    pub fn recv(&mut self) -> Result<ClipValue> {
        loop {
            if self.cancel.is_cancelled() {
                return Err(ClipError::Cancelled);
            }

            let current = self.clipboard.read()?;
            if current != self.previous {
                trace!(len = current.len(), "local clipboard changed");
                self.previous = current.clone();
                return Ok(current);
            }

            if self.cancel.wait_timeout(self.interval) {
                return Err(ClipError::Cancelled);
            }
        }
    }

    /// Whether the clipboard still holds `value`.
    pub fn is_current(&self, value: &ClipValue) -> Result<bool> {
        Ok(self.clipboard.read()? == *value)
    }

    /// The last value yielded.
    pub fn previous(&self) -> &ClipValue {
        &self.previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use std::thread;

    const TICK: Duration = Duration::from_millis(5);

    fn watcher(clipboard: &Arc<MemoryClipboard>, cancel: &CancelToken) -> ClipboardWatcher {
        ClipboardWatcher::new(clipboard.clone(), TICK, cancel.clone())
    }

    #[test]
    fn test_yields_initial_non_empty_value() {
        let clipboard = Arc::new(MemoryClipboard::with_contents("start"));
        let cancel = CancelToken::new();
        let mut w = watcher(&clipboard, &cancel);

        assert_eq!(w.recv().unwrap(), ClipValue::from("start"));
    }

    #[test]
    fn test_unchanged_content_yields_nothing() {
        let clipboard = Arc::new(MemoryClipboard::with_contents("same"));
        let cancel = CancelToken::new();
        let mut w = watcher(&clipboard, &cancel);
        assert_eq!(w.recv().unwrap(), ClipValue::from("same"));

        let canceller = cancel.clone();
        let stopper = thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            canceller.cancel();
        });

        // Many polls of identical content, then cancellation.
        assert!(matches!(w.recv(), Err(ClipError::Cancelled)));
        assert!(clipboard.read_count() > 2);
        stopper.join().unwrap();
    }

    #[test]
    fn test_yields_once_per_change() {
        let clipboard = Arc::new(MemoryClipboard::new());
        let cancel = CancelToken::new();
        let mut w = watcher(&clipboard, &cancel);

        let writer = {
            let clipboard = clipboard.clone();
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(20));
                clipboard.set("a");
            })
        };

        assert_eq!(w.recv().unwrap(), ClipValue::from("a"));
        writer.join().unwrap();

        clipboard.set("b");
        assert_eq!(w.recv().unwrap(), ClipValue::from("b"));
        assert_eq!(w.previous(), &ClipValue::from("b"));
    }

    #[test]
    fn test_is_current() {
        let clipboard = Arc::new(MemoryClipboard::with_contents("a"));
        let cancel = CancelToken::new();
        let mut w = watcher(&clipboard, &cancel);

        let seen = w.recv().unwrap();
        assert!(w.is_current(&seen).unwrap());
        clipboard.set("b");
        assert!(!w.is_current(&seen).unwrap());
    }

    #[test]
    fn test_read_failure_propagates() {
        let clipboard = Arc::new(MemoryClipboard::with_contents("x"));
        clipboard.fail_next_reads(1);
        let cancel = CancelToken::new();
        let mut w = watcher(&clipboard, &cancel);

        assert!(matches!(w.recv(), Err(ClipError::Clipboard(_))));
        assert_eq!(w.recv().unwrap(), ClipValue::from("x"));
    }

    #[test]
    fn test_cancelled_before_recv() {
        let clipboard = Arc::new(MemoryClipboard::with_contents("x"));
        let cancel = CancelToken::new();
        cancel.cancel();
        let mut w = watcher(&clipboard, &cancel);

        assert!(matches!(w.recv(), Err(ClipError::Cancelled)));
    }
}
