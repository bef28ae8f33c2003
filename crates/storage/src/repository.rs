use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by progress media.
///
/// Callers above `ProgressStore` never see these: the store degrades every
/// failure to "no progress recorded" or "write skipped".
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("write failed: {0}")]
    WriteFailed(String),
}

/// A single named slot in a persistent key-value medium.
///
/// The slot holds one serialized progress table. Reads and writes are
/// synchronous and expected to be fast; the whole slot is replaced on every
/// write so the caller never observes a torn table.
pub trait ProgressMedium: Send + Sync {
    /// Read the raw slot contents, `None` if the slot has never been written.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Unavailable` if the medium cannot be read.
    fn read_slot(&self) -> Result<Option<String>, StorageError>;

    /// Replace the slot contents as one unit.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::WriteFailed` if the medium rejects the write
    /// (quota exceeded, storage disabled).
    fn write_slot(&self, raw: &str) -> Result<(), StorageError>;
}

/// In-memory medium for tests and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryMedium {
    slot: Arc<Mutex<Option<String>>>,
}

impl InMemoryMedium {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with arbitrary slot contents, e.g. a corrupt payload.
    #[must_use]
    pub fn seeded(raw: impl Into<String>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(raw.into()))),
        }
    }

    /// Raw slot contents, for assertions.
    #[must_use]
    pub fn contents(&self) -> Option<String> {
        self.slot.lock().map(|guard| guard.clone()).unwrap_or(None)
    }
}

impl ProgressMedium for InMemoryMedium {
    fn read_slot(&self) -> Result<Option<String>, StorageError> {
        let guard = self
            .slot
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        Ok(guard.clone())
    }

    fn write_slot(&self, raw: &str) -> Result<(), StorageError> {
        let mut guard = self
            .slot
            .lock()
            .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
        *guard = Some(raw.to_owned());
        Ok(())
    }
}
