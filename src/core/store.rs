//! Process-local delivery bookkeeping.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Session ids confirmed pushed. Implementations must be safe to share between
/// concurrently running passes.
pub trait DeliveredStore: Send + Sync {
    fn contains(&self, session_id: &str) -> bool;
    fn add(&self, session_id: &str);
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Lives for the process lifetime only; a restart starts empty.
#[derive(Debug, Default)]
pub struct InMemoryDeliveredStore {
    ids: Mutex<HashSet<String>>,
}

impl InMemoryDeliveredStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> Arc<dyn DeliveredStore> {
        Arc::new(Self::new())
    }

    fn ids(&self) -> std::sync::MutexGuard<'_, HashSet<String>> {
        // A poisoned set is still a valid set of ids.
        self.ids.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl DeliveredStore for InMemoryDeliveredStore {
    fn contains(&self, session_id: &str) -> bool {
        self.ids().contains(session_id)
    }

    fn add(&self, session_id: &str) {
        self.ids().insert(session_id.to_string());
    }

    fn len(&self) -> usize {
        self.ids().len()
    }
}

/// Sessions currently being pushed by some pass.
#[derive(Debug, Default)]
pub struct InFlightGuard {
    ids: Mutex<HashSet<String>>,
}

/// Releases the claimed id when dropped.
#[derive(Debug)]
pub struct InFlightClaim<'a> {
    guard: &'a InFlightGuard,
    session_id: String,
}

impl InFlightGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically checks and inserts. `None` means another pass holds the id.
    pub fn try_claim(&self, session_id: &str) -> Option<InFlightClaim<'_>> {
        let mut ids = self.ids.lock().unwrap_or_else(|p| p.into_inner());
        if !ids.insert(session_id.to_string()) {
            return None;
        }
        Some(InFlightClaim {
            guard: self,
            session_id: session_id.to_string(),
        })
    }

    pub fn is_claimed(&self, session_id: &str) -> bool {
        self.ids
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .contains(session_id)
    }
}

impl Drop for InFlightClaim<'_> {
    fn drop(&mut self) {
        self.guard
            .ids
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .remove(&self.session_id);
    }
}
