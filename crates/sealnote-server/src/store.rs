//! Storage contract and the two bundled backends.
//!
//! The lifecycle engine only needs a key/value store: get, set, remove,
//! list. TTL hints passed to `set` are advisory — a backend with native
//! per-key eviction may honor them, but the engine enforces expiration
//! itself either way.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use std::time::Duration;

use sealnote_core::{NoteId, SealnoteError, SealnoteResult, StoredNote};

pub trait NoteStore: Send + Sync {
    fn get(&self, id: &NoteId) -> SealnoteResult<Option<StoredNote>>;
    fn set(&self, id: &NoteId, note: &StoredNote, ttl_hint: Option<Duration>)
        -> SealnoteResult<()>;
    /// Remove a record. Removing an absent id is not an error.
    fn remove(&self, id: &NoteId) -> SealnoteResult<()>;
    fn list_ids(&self) -> SealnoteResult<Vec<NoteId>>;
}

/// In-memory backend. No native TTL; the sweep does all reclamation.
#[derive(Debug, Default)]
pub struct MemoryNoteStore {
    entries: RwLock<HashMap<String, StoredNote>>,
}

impl MemoryNoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl NoteStore for MemoryNoteStore {
    fn get(&self, id: &NoteId) -> SealnoteResult<Option<StoredNote>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| SealnoteError::Storage("memory store lock poisoned".into()))?;
        Ok(entries.get(id.as_str()).cloned())
    }

    fn set(
        &self,
        id: &NoteId,
        note: &StoredNote,
        _ttl_hint: Option<Duration>,
    ) -> SealnoteResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| SealnoteError::Storage("memory store lock poisoned".into()))?;
        entries.insert(id.as_str().to_string(), note.clone());
        Ok(())
    }

    fn remove(&self, id: &NoteId) -> SealnoteResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| SealnoteError::Storage("memory store lock poisoned".into()))?;
        entries.remove(id.as_str());
        Ok(())
    }

    fn list_ids(&self) -> SealnoteResult<Vec<NoteId>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| SealnoteError::Storage("memory store lock poisoned".into()))?;
        Ok(entries.keys().map(|k| NoteId::from(k.as_str())).collect())
    }
}

/// File-system backend: one JSON file per note id, written atomically via
/// temp + rename.
#[derive(Debug)]
pub struct FileNoteStore {
    dir: PathBuf,
}

impl FileNoteStore {
    pub fn open(dir: &Path) -> SealnoteResult<Self> {
        std::fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    fn path_for(&self, id: &NoteId) -> SealnoteResult<PathBuf> {
        let raw = id.as_str();
        // Ids are opaque strings from clients; never let one escape the dir
        if raw.is_empty()
            || raw.contains(['/', '\\'])
            || raw.contains("..")
            || raw.starts_with('.')
        {
            return Err(SealnoteError::Storage(format!("unsafe note id: {raw}")));
        }
        Ok(self.dir.join(format!("{raw}.json")))
    }
}

impl NoteStore for FileNoteStore {
    fn get(&self, id: &NoteId) -> SealnoteResult<Option<StoredNote>> {
        let path = self.path_for(id)?;
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let note = serde_json::from_str(&content)
            .map_err(|e| SealnoteError::Storage(format!("corrupt record {id}: {e}")))?;
        Ok(Some(note))
    }

    fn set(
        &self,
        id: &NoteId,
        note: &StoredNote,
        _ttl_hint: Option<Duration>,
    ) -> SealnoteResult<()> {
        let path = self.path_for(id)?;
        let json = serde_json::to_string(note)
            .map_err(|e| SealnoteError::Storage(format!("encode record {id}: {e}")))?;

        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, id: &NoteId) -> SealnoteResult<()> {
        let path = self.path_for(id)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn list_ids(&self) -> SealnoteResult<Vec<NoteId>> {
        let mut ids = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                ids.push(NoteId::from(stem));
            }
        }
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_note() -> StoredNote {
        StoredNote {
            payload: "aXY:Y2lwaGVydGV4dA".into(),
            encryption_algorithm: "aes-256-gcm".into(),
            serialization_format: "cbor-packed".into(),
            expiration_date: None,
            delete_after_reading: false,
            is_public: true,
        }
    }

    fn exercise_store(store: &dyn NoteStore) {
        let id = NoteId::generate();
        assert!(store.get(&id).unwrap().is_none());

        store.set(&id, &sample_note(), None).unwrap();
        let loaded = store.get(&id).unwrap().unwrap();
        assert_eq!(loaded, sample_note());
        assert_eq!(store.list_ids().unwrap(), vec![id.clone()]);

        store.remove(&id).unwrap();
        assert!(store.get(&id).unwrap().is_none());
        // Removing twice is fine
        store.remove(&id).unwrap();
    }

    #[test]
    fn memory_store_contract() {
        exercise_store(&MemoryNoteStore::new());
    }

    #[test]
    fn file_store_contract() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileNoteStore::open(dir.path()).unwrap();
        exercise_store(&store);
    }

    #[test]
    fn file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let id = NoteId::generate();
        {
            let store = FileNoteStore::open(dir.path()).unwrap();
            store.set(&id, &sample_note(), None).unwrap();
        }
        let store = FileNoteStore::open(dir.path()).unwrap();
        assert_eq!(store.get(&id).unwrap().unwrap(), sample_note());
    }

    #[test]
    fn file_store_rejects_traversal_ids() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileNoteStore::open(dir.path()).unwrap();
        for bad in ["../escape", "a/b", ".hidden", ""] {
            let err = store.get(&NoteId::from(bad)).unwrap_err();
            assert!(matches!(err, SealnoteError::Storage(_)), "id {bad:?}");
        }
    }

    #[test]
    fn file_store_reports_corrupt_records() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileNoteStore::open(dir.path()).unwrap();
        let id = NoteId::generate();
        std::fs::write(dir.path().join(format!("{id}.json")), "not json").unwrap();

        let err = store.get(&id).unwrap_err();
        assert!(matches!(err, SealnoteError::Storage(_)));
    }
}
