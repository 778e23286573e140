//! Bounded, ordered history of pushed clipboard values.
//!
//! The store keeps at most `capacity` entries in a ring buffer. Pushing past
//! capacity evicts the oldest entry in O(1). Reads enumerate newest-first.
//! The store never deduplicates; that policy belongs to the service.

mod ring;

pub use ring::HistoryStore;
