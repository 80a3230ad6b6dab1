//! Single-slot in-flight mutation marker.

use std::fmt::Display;
use std::sync::Mutex;

use invex_core::{AppError, AppResult};

/// Tracks the id of the one mutation currently in flight.
///
/// A second action on the same id is refused before any remote call; an
/// action on a different id takes over the slot (that interleaving is the
/// caller's design choice — only same-id is guarded). The returned guard
/// releases the slot on drop, so the marker clears on success, failure,
/// and abandonment alike.
#[derive(Debug, Default)]
pub(crate) struct ProcessingSlot<T: Clone + PartialEq> {
    current: Mutex<Option<T>>,
}

impl<T: Clone + PartialEq + Display> ProcessingSlot<T> {
    pub(crate) fn new() -> Self {
        Self {
            current: Mutex::new(None),
        }
    }

    /// The id currently being processed, if any.
    pub(crate) fn current(&self) -> Option<T> {
        self.current.lock().expect("processing slot poisoned").clone()
    }

    /// Claim the slot for `id`, refusing a same-id double submission.
    pub(crate) fn begin(&self, id: &T) -> AppResult<ProcessingGuard<'_, T>> {
        let mut slot = self.current.lock().expect("processing slot poisoned");
        if slot.as_ref() == Some(id) {
            return Err(AppError::precondition(format!(
                "An action for {id} is already in flight"
            )));
        }
        *slot = Some(id.clone());
        Ok(ProcessingGuard { slot: self, id: id.clone() })
    }
}

/// Releases the slot on drop, but only if it still holds this guard's id.
pub(crate) struct ProcessingGuard<'a, T: Clone + PartialEq> {
    slot: &'a ProcessingSlot<T>,
    id: T,
}

impl<T: Clone + PartialEq> Drop for ProcessingGuard<'_, T> {
    fn drop(&mut self) {
        if let Ok(mut slot) = self.slot.current.lock() {
            if slot.as_ref() == Some(&self.id) {
                *slot = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_id_is_refused_while_in_flight() {
        let slot: ProcessingSlot<String> = ProcessingSlot::new();
        let guard = slot.begin(&"a".to_string()).unwrap();
        assert!(slot.begin(&"a".to_string()).is_err());
        drop(guard);
        assert!(slot.begin(&"a".to_string()).is_ok());
    }

    #[test]
    fn test_different_id_takes_over_the_slot() {
        let slot: ProcessingSlot<String> = ProcessingSlot::new();
        let first = slot.begin(&"a".to_string()).unwrap();
        let second = slot.begin(&"b".to_string()).unwrap();
        assert_eq!(slot.current().as_deref(), Some("b"));

        // The superseded guard must not clear the newer claim.
        drop(first);
        assert_eq!(slot.current().as_deref(), Some("b"));
        drop(second);
        assert_eq!(slot.current(), None);
    }
}
