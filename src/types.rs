//! Core types for the shared clipboard.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// An immutable clipboard value.
///
/// Backed by a shared slice so fanning one value out to many subscribers
/// never copies the payload. Equality is byte-exact.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ClipValue(Arc<[u8]>);

impl ClipValue {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        ClipValue(Arc::from(bytes.into()))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }

    /// Short content fingerprint for logs (first 8 bytes of SHA-256, hex).
    ///
    /// Clipboard contents never go to the log; this is what does.
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(&self.0);
        hex::encode(&digest[..8])
    }
}

impl Default for ClipValue {
    fn default() -> Self {
        ClipValue::new(Vec::new())
    }
}

impl Deref for ClipValue {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for ClipValue {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for ClipValue {
    fn from(bytes: Vec<u8>) -> Self {
        ClipValue(Arc::from(bytes))
    }
}

impl From<&[u8]> for ClipValue {
    fn from(bytes: &[u8]) -> Self {
        ClipValue(Arc::from(bytes))
    }
}

impl From<&str> for ClipValue {
    fn from(s: &str) -> Self {
        ClipValue::from(s.as_bytes())
    }
}

impl From<String> for ClipValue {
    fn from(s: String) -> Self {
        ClipValue::from(s.into_bytes())
    }
}

impl fmt::Debug for ClipValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match std::str::from_utf8(&self.0) {
            Ok(s) if s.len() <= 32 => write!(f, "ClipValue({:?})", s),
            _ => write!(f, "ClipValue({} bytes)", self.0.len()),
        }
    }
}

impl Serialize for ClipValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(&self.0)
    }
}

impl<'de> Deserialize<'de> for ClipValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<u8>::deserialize(deserializer).map(ClipValue::from)
    }
}

/// Arrival position of a history entry. Starts at 1 and never repeats.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct Ordinal(pub u64);

impl fmt::Debug for Ordinal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ord({})", self.0)
    }
}

impl fmt::Display for Ordinal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Ordinal {
    pub fn next(self) -> Self {
        Ordinal(self.0 + 1)
    }
}

/// A value retained in the history store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub value: ClipValue,
    pub ordinal: Ordinal,
}

/// Service statistics.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceStats {
    /// Entries currently retained.
    pub history_len: usize,
    /// Configured history capacity.
    pub capacity: usize,
    /// Accepted pushes since startup (including evicted ones).
    pub total_pushed: u64,
    /// Live subscriptions.
    pub subscribers: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_exact_equality() {
        assert_eq!(ClipValue::from("abc"), ClipValue::new(b"abc".to_vec()));
        assert_ne!(ClipValue::from("abc"), ClipValue::from("abc "));
    }

    #[test]
    fn test_fingerprint_is_stable_and_short() {
        let a = ClipValue::from("secret");
        assert_eq!(a.fingerprint(), ClipValue::from("secret").fingerprint());
        assert_eq!(a.fingerprint().len(), 16);
        assert_ne!(a.fingerprint(), ClipValue::from("other").fingerprint());
    }

    #[test]
    fn test_debug_hides_large_payloads() {
        let big = ClipValue::new(vec![b'x'; 100]);
        assert_eq!(format!("{:?}", big), "ClipValue(100 bytes)");
        assert_eq!(format!("{:?}", ClipValue::from("hi")), "ClipValue(\"hi\")");
    }

    #[test]
    fn test_entry_json() {
        let entry = HistoryEntry {
            value: ClipValue::from("hi"),
            ordinal: Ordinal(3),
        };
        let json = serde_json::to_string(&entry).unwrap();
        let back: HistoryEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }
}
