//! In-memory slot storage for store documents.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use crate::task::ports::{PersistenceError, PersistenceResult, StatePersistence};

/// Thread-safe in-memory persistence with switchable write failures.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStatePersistence {
    slots: Arc<RwLock<HashMap<String, String>>>,
    failing_writes: Arc<AtomicBool>,
    saves: Arc<AtomicUsize>,
}

impl InMemoryStatePersistence {
    /// Creates empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates storage holding one pre-existing document.
    #[must_use]
    pub fn with_document(slot: impl Into<String>, document: impl Into<String>) -> Self {
        let storage = Self::new();
        if let Ok(mut slots) = storage.slots.write() {
            slots.insert(slot.into(), document.into());
        }
        storage
    }

    /// Makes subsequent writes fail (or succeed again).
    pub fn fail_writes(&self, failing: bool) {
        self.failing_writes.store(failing, Ordering::SeqCst);
    }

    /// Returns the document currently stored under `slot`.
    #[must_use]
    pub fn document(&self, slot: &str) -> Option<String> {
        self.slots
            .read()
            .ok()
            .and_then(|slots| slots.get(slot).cloned())
    }

    /// Returns the number of successful writes.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StatePersistence for InMemoryStatePersistence {
    async fn load(&self, slot: &str) -> PersistenceResult<Option<String>> {
        let slots = self
            .slots
            .read()
            .map_err(|err| PersistenceError::io(std::io::Error::other(err.to_string())))?;
        Ok(slots.get(slot).cloned())
    }

    async fn save(&self, slot: &str, document: &str) -> PersistenceResult<()> {
        if self.failing_writes.load(Ordering::SeqCst) {
            return Err(PersistenceError::Unavailable(format!(
                "writes to '{slot}' are disabled"
            )));
        }
        let mut slots = self
            .slots
            .write()
            .map_err(|err| PersistenceError::io(std::io::Error::other(err.to_string())))?;
        slots.insert(slot.to_owned(), document.to_owned());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
