//! JSON-file-backed deposition store.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use dashmap::DashMap;

use crate::deposition::types::Deposition;

/// First deposition id handed out by an empty store.
pub const FIRST_DEPOSITION_ID: u64 = 1000;

/// Thread-safe deposition store persisted to a JSON file.
///
/// Every mutation rewrites the entire file. The id sequence resumes past
/// the highest stored id so restarts never reuse an id.
pub struct DepositionStore {
    path: PathBuf,
    depositions: DashMap<u64, Deposition>,
    next_id: AtomicU64,
    // Serializes file writes so concurrent mutations cannot interleave
    // the truncate+write and corrupt the store.
    save_lock: Mutex<()>,
}

impl DepositionStore {
    /// Open a store, loading any existing records from `path`.
    ///
    /// A missing file yields an empty store; an unreadable or corrupt file
    /// logs an error and also yields an empty store.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let depositions = DashMap::new();
        let mut next_id = FIRST_DEPOSITION_ID;

        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(content) => match serde_json::from_str::<BTreeMap<u64, Deposition>>(&content) {
                    Ok(records) => {
                        if let Some(last) = records.keys().next_back() {
                            next_id = last + 1;
                        }
                        for (id, dep) in records {
                            depositions.insert(id, dep);
                        }
                    }
                    Err(e) => {
                        tracing::error!(path = %path.display(), error = %e, "Corrupt deposition store, starting empty");
                    }
                },
                Err(e) => {
                    tracing::error!(path = %path.display(), error = %e, "Failed to read deposition store, starting empty");
                }
            }
        }

        Self {
            path,
            depositions,
            next_id: AtomicU64::new(next_id),
            save_lock: Mutex::new(()),
        }
    }

    /// Allocate the next deposition id.
    pub fn allocate_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    pub fn get(&self, id: u64) -> Option<Deposition> {
        self.depositions.get(&id).map(|d| d.clone())
    }

    /// Insert or replace a record and persist.
    pub fn put(&self, deposition: Deposition) {
        self.depositions.insert(deposition.id, deposition);
        self.save();
    }

    /// Mutate a record in place under its shard lock, then persist.
    ///
    /// The closure runs while the entry is exclusively held, so two
    /// concurrent updates to the same deposition cannot lose writes the
    /// way a get-clone-put round trip would. Returns the updated record,
    /// or None when the id is unknown.
    pub fn update<F>(&self, id: u64, f: F) -> Option<Deposition>
    where
        F: FnOnce(&mut Deposition),
    {
        let updated = {
            let mut entry = self.depositions.get_mut(&id)?;
            f(entry.value_mut());
            entry.value().clone()
            // entry guard drops here; save() iterates the map and must
            // not run while a shard is write-locked
        };
        self.save();
        Some(updated)
    }

    /// Remove a record, persisting when something was removed.
    pub fn remove(&self, id: u64) -> bool {
        let removed = self.depositions.remove(&id).is_some();
        if removed {
            self.save();
        }
        removed
    }

    /// All records, newest id first.
    pub fn all(&self) -> Vec<Deposition> {
        let mut records: Vec<Deposition> =
            self.depositions.iter().map(|e| e.value().clone()).collect();
        records.sort_by(|a, b| b.id.cmp(&a.id));
        records
    }

    pub fn len(&self) -> usize {
        self.depositions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.depositions.is_empty()
    }

    /// Write the whole store to disk. Failures are logged, never fatal.
    fn save(&self) {
        let _guard = self.save_lock.lock().unwrap_or_else(|e| e.into_inner());
        let snapshot: BTreeMap<u64, Deposition> = self
            .depositions
            .iter()
            .map(|e| (*e.key(), e.value().clone()))
            .collect();

        let serialized = match serde_json::to_string_pretty(&snapshot) {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize deposition store");
                return;
            }
        };

        if let Err(e) = std::fs::write(&self.path, serialized) {
            tracing::error!(path = %self.path.display(), error = %e, "Failed to write deposition store");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deposition::types::DepositionState;

    fn sample(id: u64) -> Deposition {
        Deposition {
            id,
            conceptrecid: id - 1,
            created: "2026-01-01T00:00:00+00:00".into(),
            modified: "2026-01-01T00:00:00+00:00".into(),
            metadata: Default::default(),
            title: "sample".into(),
            files: Vec::new(),
            doi: None,
            state: DepositionState::Unsubmitted,
            submitted: false,
            version_count: 0,
            dirty_files: false,
        }
    }

    #[test]
    fn missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = DepositionStore::open(dir.path().join("store.json"));
        assert!(store.is_empty());
        assert_eq!(store.allocate_id(), FIRST_DEPOSITION_ID);
    }

    #[test]
    fn corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "not json at all").unwrap();

        let store = DepositionStore::open(&path);
        assert!(store.is_empty());
    }

    #[test]
    fn records_survive_reopen_and_ids_resume() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let store = DepositionStore::open(&path);
        let id = store.allocate_id();
        store.put(sample(id));
        drop(store);

        let reopened = DepositionStore::open(&path);
        assert_eq!(reopened.len(), 1);
        assert!(reopened.get(id).is_some());
        assert_eq!(reopened.allocate_id(), id + 1);
    }

    #[test]
    fn update_mutates_in_place_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let store = DepositionStore::open(&path);
        store.put(sample(1000));

        let updated = store.update(1000, |dep| dep.title = "renamed".into());
        assert_eq!(updated.unwrap().title, "renamed");
        assert!(store.update(4242, |_| ()).is_none());

        let reopened = DepositionStore::open(&path);
        assert_eq!(reopened.get(1000).unwrap().title, "renamed");
    }

    #[test]
    fn all_is_sorted_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let store = DepositionStore::open(dir.path().join("store.json"));
        store.put(sample(1000));
        store.put(sample(1002));
        store.put(sample(1001));

        let ids: Vec<u64> = store.all().iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![1002, 1001, 1000]);
    }
}
