use std::sync::Arc;

use case_core::model::{CaseId, ProgressRecord, ProgressTable};

use crate::repository::ProgressMedium;

/// Slot key the progress table has always lived under.
pub const PROGRESS_SLOT: &str = "surgeonpro_v1_progress";

/// Defensive facade over a `ProgressMedium`.
///
/// Contract: a corrupt, missing, or unavailable slot loads as an empty
/// table, and a failed write is dropped. Neither path is an error to the
/// session; both are logged so they stay observable.
#[derive(Clone)]
pub struct ProgressStore {
    medium: Arc<dyn ProgressMedium>,
}

impl ProgressStore {
    #[must_use]
    pub fn new(medium: Arc<dyn ProgressMedium>) -> Self {
        Self { medium }
    }

    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(crate::repository::InMemoryMedium::new()))
    }

    /// Load the persisted table, degrading every failure to an empty table.
    #[must_use]
    pub fn load(&self) -> ProgressTable {
        let raw = match self.medium.read_slot() {
            Ok(Some(raw)) => raw,
            Ok(None) => return ProgressTable::new(),
            Err(err) => {
                log::warn!("progress slot unreadable, starting empty: {err}");
                return ProgressTable::new();
            }
        };

        match serde_json::from_str::<ProgressTable>(&raw) {
            Ok(table) => table,
            Err(err) => {
                log::warn!("progress slot malformed, starting empty: {err}");
                ProgressTable::new()
            }
        }
    }

    /// Write the full table back as one unit. Failures are swallowed: the
    /// update is simply not durable and the session continues.
    pub fn save(&self, table: &ProgressTable) {
        let raw = match serde_json::to_string(table) {
            Ok(raw) => raw,
            Err(err) => {
                log::warn!("progress table not serializable, skipping save: {err}");
                return;
            }
        };
        if let Err(err) = self.medium.write_slot(&raw) {
            log::warn!("progress save failed, update not persisted: {err}");
        }
    }

    /// Read-merge-write update for a single case.
    ///
    /// Always reloads the persisted table first so records written by earlier
    /// sessions are merged rather than clobbered by a stale in-memory copy.
    pub fn record_case(&self, case_id: &CaseId, record: ProgressRecord) {
        let mut table = self.load();
        table.set(case_id, record);
        self.save(&table);
    }
}
