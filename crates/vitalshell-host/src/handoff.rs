//! Single-slot mailbox carrying results across a screen transition.

use std::sync::{Arc, Mutex, PoisonError};

/// Write-once/read-once slot for one screen transition.
///
/// The exit coordinator writes the decoded result list once per exit; the
/// next screen's initialization takes it once. An absent write leaves the
/// slot logically empty. The slot is cheap to clone; clones share the value.
#[derive(Debug, Default)]
pub struct HandoffSlot<T> {
    inner: Arc<Mutex<Option<T>>>,
}

impl<T> Clone for HandoffSlot<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> HandoffSlot<T> {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(None)),
        }
    }

    /// Write a value. The first write per transition wins; a second write
    /// before the read is dropped and logged.
    pub fn publish(&self, value: T) -> bool {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        if guard.is_some() {
            tracing::warn!("handoff slot already written, dropping second write");
            return false;
        }
        *guard = Some(value);
        true
    }

    /// Take the value out, emptying the slot.
    pub fn take(&self) -> Option<T> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    /// Whether nothing has been written since the last take.
    pub fn is_empty(&self) -> bool {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_once_read_once() {
        let slot = HandoffSlot::new();
        assert!(slot.is_empty());

        assert!(slot.publish(vec![1, 2, 3]));
        assert!(!slot.is_empty());

        assert_eq!(slot.take(), Some(vec![1, 2, 3]));
        assert!(slot.is_empty());
        assert_eq!(slot.take(), None);
    }

    #[test]
    fn test_first_write_wins() {
        let slot = HandoffSlot::new();
        assert!(slot.publish(vec![1]));
        assert!(!slot.publish(vec![2]));
        assert_eq!(slot.take(), Some(vec![1]));
    }

    #[test]
    fn test_clones_share_the_value() {
        let writer = HandoffSlot::new();
        let reader = writer.clone();
        writer.publish("results");
        assert_eq!(reader.take(), Some("results"));
        assert!(writer.is_empty());
    }
}
