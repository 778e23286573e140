//! Remote clipboard contract.

use super::{ClipboardService, ValueStream};
use crate::error::Result;
use crate::types::ClipValue;

/// The four clipboard operations, as called by reconciliation pumps.
///
/// Every call may fail with a transport error; the in-process service
/// never fails.
pub trait ClipboardApi: Send + Sync {
    /// Offer a new value. Empty values and repeats of the latest are ignored.
    fn push(&self, value: ClipValue) -> Result<()>;

    /// Latest value, if any.
    fn get(&self) -> Result<Option<ClipValue>>;

    /// Retained values, newest first.
    fn hist(&self) -> Result<Vec<ClipValue>>;

    /// Open a stream: current value first, then live updates.
    fn subscribe(&self) -> Result<ValueStream>;
}

impl ClipboardApi for ClipboardService {
    fn push(&self, value: ClipValue) -> Result<()> {
        ClipboardService::push(self, value);
        Ok(())
    }

    fn get(&self) -> Result<Option<ClipValue>> {
        Ok(ClipboardService::get(self))
    }

    fn hist(&self) -> Result<Vec<ClipValue>> {
        Ok(ClipboardService::hist(self))
    }

    fn subscribe(&self) -> Result<ValueStream> {
        Ok(ClipboardService::subscribe(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_shared_service_keeps_inherent_results() {
        let service = Arc::new(ClipboardService::with_capacity(3));

        let accepted: bool = service.push(ClipValue::from("a"));
        assert!(accepted);
        assert!(!service.push(ClipValue::from("a")));
        assert_eq!(service.get(), Some(ClipValue::from("a")));
    }

    #[test]
    fn test_trait_object_over_shared_service() {
        let service = Arc::new(ClipboardService::with_capacity(3));
        let api: Arc<dyn ClipboardApi> = service.clone();

        api.push(ClipValue::from("x")).unwrap();
        api.push(ClipValue::from("x")).unwrap();
        assert_eq!(api.get().unwrap(), Some(ClipValue::from("x")));
        assert_eq!(api.hist().unwrap(), vec![ClipValue::from("x")]);
        assert_eq!(service.stats().total_pushed, 1);
    }
}
