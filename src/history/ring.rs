//! Ring-buffer history store.

use crate::types::{ClipValue, HistoryEntry, Ordinal};
use parking_lot::RwLock;
use std::collections::VecDeque;

/// Ring contents plus the ordinal counter, guarded together.
struct Ring {
    /// Oldest at the front, newest at the back.
    entries: VecDeque<HistoryEntry>,
    /// Ordinal of the most recent push (0 = nothing pushed yet).
    last: Ordinal,
}

/// Bounded history of clipboard values.
///
/// `push` takes the write lock; every read takes the read lock.
pub struct HistoryStore {
    ring: RwLock<Ring>,
    capacity: usize,
}

impl HistoryStore {
    /// Create an empty store that retains at most `capacity` entries.
    ///
    /// A zero capacity is raised to one; `ClipConfig::validate` rejects it
    /// before it gets here.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            ring: RwLock::new(Ring {
                entries: VecDeque::with_capacity(capacity.min(1024)),
                last: Ordinal::default(),
            }),
            capacity,
        }
    }

    /// Append `value` as the newest entry, evicting the oldest on overflow.
    pub fn push(&self, value: ClipValue) -> Ordinal {
        let mut ring = self.ring.write();
        let ordinal = ring.last.next();
        ring.last = ordinal;

        if ring.entries.len() == self.capacity {
            ring.entries.pop_front();
        }
        ring.entries.push_back(HistoryEntry { value, ordinal });

        ordinal
    }

    /// Newest value, or `None` if nothing was pushed yet.
    pub fn get(&self) -> Option<ClipValue> {
        self.ring.read().entries.back().map(|e| e.value.clone())
    }

    /// Value at `idx` counting from the newest (0 = newest).
    pub fn get_at(&self, idx: usize) -> Option<ClipValue> {
        let ring = self.ring.read();
        let len = ring.entries.len();
        if idx >= len {
            return None;
        }
        ring.entries.get(len - 1 - idx).map(|e| e.value.clone())
    }

    /// All retained values, newest first.
    pub fn get_all(&self) -> Vec<ClipValue> {
        self.ring
            .read()
            .entries
            .iter()
            .rev()
            .map(|e| e.value.clone())
            .collect()
    }

    /// All retained entries with their ordinals, newest first.
    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.ring.read().entries.iter().rev().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.ring.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ring.read().entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Total pushes since creation, evicted ones included.
    pub fn total_pushed(&self) -> u64 {
        self.ring.read().last.0
    }
}
