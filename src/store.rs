//! # Entry store
//! Insert / delete / query-all over journal entries. Entries are independent,
//! so each mutation is a single atomic step and no transactions are needed.
//!
//! Two backends: [`MemoryStore`] for tests and ephemeral runs, and
//! [`JsonFileStore`] which rewrites one JSON file per mutation (tmp + rename).

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};

use serde::{Deserialize, Serialize};

use crate::entry::{JournalEntry, NewEntry};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store io error: {0}")]
    Io(#[from] io::Error),
    #[error("store data is malformed: {0}")]
    Serde(#[from] serde_json::Error),
}

pub trait EntryStore: Send + Sync {
    /// Persist a new entry and return it with its assigned id.
    fn insert(&self, entry: NewEntry) -> Result<JournalEntry, StoreError>;

    /// Remove by id. `Ok(false)` when no such entry exists.
    fn delete(&self, id: u64) -> Result<bool, StoreError>;

    /// All entries, oldest first.
    fn query_all(&self) -> Result<Vec<JournalEntry>, StoreError>;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Collection {
    next_id: u64,
    entries: Vec<JournalEntry>,
}

impl Collection {
    fn insert(&mut self, entry: NewEntry) -> JournalEntry {
        self.next_id = self.next_id.saturating_add(1);
        let stored = entry.into_entry(self.next_id);
        // Keep the vector ordered so reads never need to sort.
        let at = self
            .entries
            .partition_point(|e| e.created_at <= stored.created_at);
        self.entries.insert(at, stored.clone());
        stored
    }

    fn delete(&mut self, id: u64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }
}

// ------------------------------------------------------------
// In-memory
// ------------------------------------------------------------

#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Collection>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EntryStore for MemoryStore {
    fn insert(&self, entry: NewEntry) -> Result<JournalEntry, StoreError> {
        let mut g = self.inner.write().expect("memory store rwlock poisoned");
        Ok(g.insert(entry))
    }

    fn delete(&self, id: u64) -> Result<bool, StoreError> {
        let mut g = self.inner.write().expect("memory store rwlock poisoned");
        Ok(g.delete(id))
    }

    fn query_all(&self) -> Result<Vec<JournalEntry>, StoreError> {
        let g = self.inner.read().expect("memory store rwlock poisoned");
        Ok(g.entries.clone())
    }
}

// ------------------------------------------------------------
// JSON file
// ------------------------------------------------------------

/// Whole collection in one JSON file. The in-memory copy is only updated
/// after the file write succeeded.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    inner: Mutex<Collection>,
}

impl JsonFileStore {
    /// Open (or lazily create) the store at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let collection = match fs::read_to_string(&path) {
            Ok(s) if s.trim().is_empty() => Collection::default(),
            Ok(s) => {
                let mut c: Collection = serde_json::from_str(&s)?;
                c.entries
                    .sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
                let max_id = c.entries.iter().map(|e| e.id).max().unwrap_or(0);
                c.next_id = c.next_id.max(max_id);
                c
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Collection::default(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            path,
            inner: Mutex::new(collection),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn mutate<T>(&self, f: impl FnOnce(&mut Collection) -> T) -> Result<T, StoreError> {
        let mut g = self.inner.lock().expect("file store mutex poisoned");
        let mut next = g.clone();
        let out = f(&mut next);
        write_atomic(&self.path, &next)?;
        *g = next;
        Ok(out)
    }
}

impl EntryStore for JsonFileStore {
    fn insert(&self, entry: NewEntry) -> Result<JournalEntry, StoreError> {
        self.mutate(|c| c.insert(entry))
    }

    fn delete(&self, id: u64) -> Result<bool, StoreError> {
        let g = self.inner.lock().expect("file store mutex poisoned");
        let exists = g.entries.iter().any(|e| e.id == id);
        drop(g);
        if !exists {
            return Ok(false);
        }
        self.mutate(|c| c.delete(id))
    }

    fn query_all(&self) -> Result<Vec<JournalEntry>, StoreError> {
        let g = self.inner.lock().expect("file store mutex poisoned");
        Ok(g.entries.clone())
    }
}

fn write_atomic(path: &Path, value: &Collection) -> Result<(), StoreError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    let tmp = path.with_extension("json.tmp");
    let json = serde_json::to_vec_pretty(value)?;
    let mut f = fs::File::create(&tmp)?;
    f.write_all(&json)?;
    f.sync_all()?;
    fs::rename(tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mood::MoodReading;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn new_entry(text: &str, raw: f32, at: DateTime<Utc>) -> NewEntry {
        NewEntry {
            text: text.to_string(),
            reading: MoodReading::from_sentiment(Some(raw)),
            summary: text.to_string(),
            created_at: at,
        }
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 11, 10, 8, 0, 0).unwrap()
    }

    #[test]
    fn memory_store_assigns_ids_and_orders_by_time() {
        let store = MemoryStore::new();
        let late = store.insert(new_entry("late", 0.1, t0() + Duration::hours(5))).unwrap();
        let early = store.insert(new_entry("early", 0.2, t0())).unwrap();
        assert_eq!(late.id, 1);
        assert_eq!(early.id, 2);

        let all = store.query_all().unwrap();
        let texts: Vec<_> = all.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["early", "late"]);
    }

    #[test]
    fn memory_store_delete() {
        let store = MemoryStore::new();
        let e = store.insert(new_entry("a", 0.0, t0())).unwrap();
        assert!(store.delete(e.id).unwrap());
        assert!(!store.delete(e.id).unwrap());
        assert!(store.query_all().unwrap().is_empty());
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let store = MemoryStore::new();
        let a = store.insert(new_entry("a", 0.0, t0())).unwrap();
        store.delete(a.id).unwrap();
        let b = store.insert(new_entry("b", 0.0, t0())).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn file_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/entries.json");

        let store = JsonFileStore::open(&path).unwrap();
        let a = store.insert(new_entry("first", -0.7, t0())).unwrap();
        let b = store
            .insert(new_entry("second", 0.4, t0() + Duration::days(1)))
            .unwrap();
        assert!(store.delete(a.id).unwrap());
        drop(store);

        let reopened = JsonFileStore::open(&path).unwrap();
        let all = reopened.query_all().unwrap();
        assert_eq!(all, vec![b.clone()]);
        assert_eq!(all[0].category(), b.category());

        let c = reopened.insert(new_entry("third", 0.0, t0())).unwrap();
        assert_eq!(c.id, 3);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn file_store_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("entries.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            JsonFileStore::open(&path),
            Err(StoreError::Serde(_))
        ));
    }

    #[test]
    fn file_store_missing_or_empty_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let missing = JsonFileStore::open(dir.path().join("none.json")).unwrap();
        assert!(missing.query_all().unwrap().is_empty());

        let empty_path = dir.path().join("empty.json");
        fs::write(&empty_path, "").unwrap();
        let empty = JsonFileStore::open(&empty_path).unwrap();
        assert!(empty.query_all().unwrap().is_empty());
    }
}
