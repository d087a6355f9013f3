use crate::models::UploadRecord;
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

/// In-memory metadata store, shared between the HTTP handlers and the
/// cleanup sweeper. Lost on restart; any files left on disk are orphaned,
/// which is acceptable for this service.
///
/// A single mutex guards the map. The lock is only ever held for the map
/// operation itself, never across file I/O.
#[derive(Debug, Default)]
pub struct MetadataStore {
    records: Mutex<HashMap<Uuid, UploadRecord>>,
}

impl MetadataStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, record: UploadRecord) {
        self.lock().insert(record.id, record);
    }

    pub fn get(&self, id: &Uuid) -> Option<UploadRecord> {
        self.lock().get(id).cloned()
    }

    /// Removes a record; returns it if it was present. Removing an absent
    /// id is a no-op, so repeated sweeps stay idempotent.
    pub fn remove(&self, id: &Uuid) -> Option<UploadRecord> {
        self.lock().remove(id)
    }

    /// Snapshot of all records. The sweeper iterates this copy so the lock
    /// is released before any file deletion happens.
    pub fn list(&self) -> Vec<UploadRecord> {
        self.lock().values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<Uuid, UploadRecord>> {
        // A poisoned lock only means another thread panicked mid-operation;
        // the map itself is still a valid map of records.
        self.records.lock().unwrap_or_else(|e| e.into_inner())
    }
}
