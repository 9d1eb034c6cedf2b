use std::sync::Arc;

use chrono::Utc;
use log::{debug, error, info, trace, warn};

use crate::{KeyValueStore, MeetlogError, Note, NoteDraft, Result, NOTES_KEY};

/// Owns the list of notes and mirrors it, as one JSON array, to a single
/// key-value slot.
///
/// The list is kept newest first. Every mutation rewrites the whole slot.
pub struct NoteStore {
    /// Persistence backend
    kv: Arc<dyn KeyValueStore>,

    /// Notes, newest first
    notes: Vec<Note>,

    /// Flag indicating that `load` has run
    loaded: bool,
}

impl NoteStore {
    /// Creates an empty store on top of the given backend. Call [`load`]
    /// before use.
    ///
    /// [`load`]: NoteStore::load
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self {
            kv,
            notes: Vec::new(),
            loaded: false,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Reads the notes slot into memory.
    ///
    /// An empty slot, an unreadable slot and malformed JSON all leave the
    /// store empty. Errors are logged, never returned, so a corrupt slot
    /// cannot lock the user out.
    ///
    /// # Returns
    ///
    /// The number of notes loaded
    pub async fn load(&mut self) -> usize {
        debug!("Loading notes from slot '{}'", NOTES_KEY);

        self.notes = match self.kv.get(NOTES_KEY).await {
            Ok(Some(stored)) => match serde_json::from_str::<Vec<Note>>(&stored) {
                Ok(notes) => notes,
                Err(e) => {
                    error!("Stored notes are malformed, starting empty: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => {
                debug!("No stored notes yet");
                Vec::new()
            }
            Err(e) => {
                error!("Failed to read stored notes, starting empty: {}", e);
                Vec::new()
            }
        };

        self.loaded = true;
        info!("Loaded {} notes", self.notes.len());
        self.notes.len()
    }

    /// Adds a note built from `draft` at the front of the list and persists.
    ///
    /// The draft is not validated here. If the write fails the note stays
    /// in memory and the error is returned.
    ///
    /// # Returns
    ///
    /// The generated note id
    pub async fn add(&mut self, draft: NoteDraft) -> Result<String> {
        let created_at = Utc::now().timestamp_millis();
        let id = self.next_id(created_at);
        info!("Adding note: {}", id);

        self.notes.insert(0, Note::from_draft(id.clone(), created_at, draft));
        self.persist().await?;

        Ok(id)
    }

    /// All notes, newest first.
    pub fn list(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Note> {
        trace!("Looking up note: {}", id);
        self.notes.iter().find(|note| note.id == id)
    }

    /// Replaces every editable field of the note with `draft` and persists.
    ///
    /// # Returns
    ///
    /// `false` if no note has this id; nothing is written in that case
    pub async fn update(&mut self, id: &str, draft: NoteDraft) -> Result<bool> {
        let Some(note) = self.notes.iter_mut().find(|note| note.id == id) else {
            warn!("Update of unknown note ignored: {}", id);
            return Ok(false);
        };

        info!("Updating note: {}", id);
        note.apply(draft);
        self.persist().await?;
        Ok(true)
    }

    /// Removes the note and persists. Deleting twice is the same as once.
    ///
    /// # Returns
    ///
    /// `false` if no note has this id; nothing is written in that case
    pub async fn delete(&mut self, id: &str) -> Result<bool> {
        let before = self.notes.len();
        self.notes.retain(|note| note.id != id);

        if self.notes.len() == before {
            warn!("Delete of unknown note ignored: {}", id);
            return Ok(false);
        }

        info!("Deleted note: {}", id);
        self.persist().await?;
        Ok(true)
    }

    /// Picks an id from the creation timestamp, bumped past every existing
    /// numeric id so ids stay unique and ordered by creation.
    ///
    /// If the highest id cannot be bumped, falls back to `<created_at>-<n>`
    /// with the first free `n`.
    fn next_id(&self, created_at: i64) -> String {
        let highest = self
            .notes
            .iter()
            .filter_map(|note| note.id.parse::<i64>().ok())
            .max();

        match highest {
            Some(highest) if highest >= created_at => match highest.checked_add(1) {
                Some(next) => next.to_string(),
                None => {
                    warn!("Numeric note ids exhausted, using a suffixed id");
                    self.suffixed_id(created_at)
                }
            },
            _ => created_at.to_string(),
        }
    }

    fn suffixed_id(&self, created_at: i64) -> String {
        let mut n: u64 = 1;
        loop {
            let candidate = format!("{}-{}", created_at, n);
            if self.get_by_id(&candidate).is_none() {
                return candidate;
            }
            n += 1;
        }
    }

    async fn persist(&self) -> Result<()> {
        let json = serde_json::to_string(&self.notes).map_err(|e| {
            error!("Failed to serialize notes: {}", e);
            MeetlogError::Serialization(e)
        })?;

        self.kv.set(NOTES_KEY, &json).await.map_err(|e| {
            error!("Failed to save notes: {}", e);
            MeetlogError::Persistence {
                key: NOTES_KEY.to_string(),
                message: e.to_string(),
            }
        })?;

        trace!("Persisted {} notes", self.notes.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{kv::ReadOnlyKvStore, FileKvStore, MemoryKvStore};
    use async_trait::async_trait;
    use tempfile::TempDir;

    /// Fails every read.
    struct BrokenKv;

    #[async_trait]
    impl KeyValueStore for BrokenKv {
        async fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(MeetlogError::Io(std::io::Error::other("disk gone")))
        }

        async fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Ok(())
        }
    }

    fn draft(manager: &str, subject: &str) -> NoteDraft {
        NoteDraft {
            date: "2024-01-15".to_string(),
            time: "14:30".to_string(),
            manager_name: manager.to_string(),
            subject: subject.to_string(),
            description: String::new(),
            witnesses: String::new(),
        }
    }

    async fn create_test_store() -> NoteStore {
        let mut store = NoteStore::new(Arc::new(MemoryKvStore::new()));
        store.load().await;
        store
    }

    #[tokio::test]
    async fn test_add_single_note() {
        let mut store = create_test_store().await;

        let id = store.add(draft("Dupont", "Retard")).await.unwrap();

        assert!(!id.is_empty());
        assert_eq!(store.len(), 1);
        let first = &store.list()[0];
        assert_eq!(first.id, id);
        assert_eq!(first.manager_name, "Dupont");
        assert_eq!(first.subject, "Retard");
        assert_eq!(first.description, "");
        assert_eq!(first.witnesses, "");
    }

    #[tokio::test]
    async fn test_get_by_id_returns_draft_plus_identity() {
        let mut store = create_test_store().await;
        let input = draft("Tremblay", "Absence");

        let id = store.add(input.clone()).await.unwrap();
        let note = store.get_by_id(&id).unwrap();

        assert_eq!(note.to_draft(), input);
        assert!(note.created_at > 0);
    }

    #[tokio::test]
    async fn test_newest_note_is_listed_first_with_unique_ids() {
        let mut store = create_test_store().await;

        let first = store.add(draft("A", "one")).await.unwrap();
        let second = store.add(draft("B", "two")).await.unwrap();
        let third = store.add(draft("C", "three")).await.unwrap();

        let ids: Vec<&str> = store.list().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec![third.as_str(), second.as_str(), first.as_str()]);

        let numeric: Vec<i64> = ids.iter().map(|id| id.parse().unwrap()).collect();
        assert!(numeric[0] > numeric[1] && numeric[1] > numeric[2]);
    }

    #[tokio::test]
    async fn test_unknown_id_lookups_and_mutations() {
        let mut store = create_test_store().await;
        store.add(draft("Dupont", "Retard")).await.unwrap();
        let before = store.list().to_vec();

        assert!(store.get_by_id("missing").is_none());
        assert!(!store.update("missing", draft("X", "Y")).await.unwrap());
        assert!(!store.delete("missing").await.unwrap());
        assert_eq!(store.list(), before.as_slice());
    }

    #[tokio::test]
    async fn test_update_replaces_whole_record() {
        let mut store = create_test_store().await;
        let id = store.add(draft("Dupont", "Retard")).await.unwrap();
        let created_at = store.get_by_id(&id).unwrap().created_at;

        let mut changed = draft("Martin", "Absence");
        changed.description = "Convoqué sans préavis".to_string();
        assert!(store.update(&id, changed.clone()).await.unwrap());

        let note = store.get_by_id(&id).unwrap();
        assert_eq!(note.to_draft(), changed);
        assert_eq!(note.created_at, created_at);
    }

    #[tokio::test]
    async fn test_delete_twice_equals_once() {
        let mut store = create_test_store().await;
        let keep = store.add(draft("A", "keep")).await.unwrap();
        let gone = store.add(draft("B", "gone")).await.unwrap();

        assert!(store.delete(&gone).await.unwrap());
        let after_once = store.list().to_vec();
        assert!(!store.delete(&gone).await.unwrap());

        assert_eq!(store.list(), after_once.as_slice());
        assert_eq!(store.len(), 1);
        assert_eq!(store.list()[0].id, keep);
    }

    #[tokio::test]
    async fn test_reload_reproduces_notes_after_restart() {
        let dir = TempDir::new().unwrap();
        let kv: Arc<dyn KeyValueStore> = Arc::new(FileKvStore::new(dir.path()));

        let mut store = NoteStore::new(kv.clone());
        store.load().await;
        store.add(draft("A", "first")).await.unwrap();
        store.add(draft("B", "second")).await.unwrap();
        let before = store.list().to_vec();
        drop(store);

        let mut restarted = NoteStore::new(kv);
        assert_eq!(restarted.load().await, 2);
        assert_eq!(restarted.list(), before.as_slice());
        assert_eq!(restarted.list()[0].subject, "second");
    }

    #[tokio::test]
    async fn test_malformed_slot_loads_empty() {
        let kv = MemoryKvStore::with_slot(NOTES_KEY, "{not json");
        let mut store = NoteStore::new(Arc::new(kv));

        assert_eq!(store.load().await, 0);
        assert!(store.is_loaded());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_read_failure_loads_empty() {
        let mut store = NoteStore::new(Arc::new(BrokenKv));

        assert_eq!(store.load().await, 0);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_failed_write_keeps_note_in_memory() {
        let mut store = NoteStore::new(Arc::new(ReadOnlyKvStore));
        store.load().await;

        let result = store.add(draft("Dupont", "Retard")).await;

        assert!(matches!(result, Err(MeetlogError::Persistence { .. })));
        assert_eq!(store.len(), 1);
        assert_eq!(store.list()[0].manager_name, "Dupont");
    }

    #[tokio::test]
    async fn test_failed_write_keeps_update_and_delete_in_memory() {
        let mut store = NoteStore::new(Arc::new(ReadOnlyKvStore));
        store.load().await;
        let _ = store.add(draft("Dupont", "Retard")).await;
        let _ = store.add(draft("Martin", "Absence")).await;
        let first = store.list()[1].id.clone();
        let second = store.list()[0].id.clone();

        let updated = store.update(&first, draft("Dupont", "Suivi")).await;
        assert!(matches!(updated, Err(MeetlogError::Persistence { .. })));
        assert_eq!(store.get_by_id(&first).unwrap().subject, "Suivi");

        let deleted = store.delete(&second).await;
        assert!(matches!(deleted, Err(MeetlogError::Persistence { .. })));
        assert!(store.get_by_id(&second).is_none());
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_add_after_highest_possible_id_does_not_overflow() {
        let stored = format!(
            r#"[{{"id":"{}","date":"","time":"","managerName":"A","subject":"B","createdAt":1}}]"#,
            i64::MAX
        );
        let mut store = NoteStore::new(Arc::new(MemoryKvStore::with_slot(NOTES_KEY, &stored)));
        store.load().await;

        let first = store.add(draft("Roy", "Un")).await.unwrap();
        let second = store.add(draft("Roy", "Deux")).await.unwrap();

        assert_ne!(first, second);
        assert_ne!(first, i64::MAX.to_string());
        assert!(first.parse::<i64>().is_err());
        assert_eq!(store.len(), 3);
        assert_eq!(store.list()[0].id, second);
    }

    #[tokio::test]
    async fn test_loads_records_written_in_camel_case() {
        let stored = r#"[{"id":"1700000000001","date":"2023-11-14","time":"22:13","managerName":"Roy","subject":"Retard","description":"","witnesses":"","createdAt":1700000000001}]"#;
        let mut store = NoteStore::new(Arc::new(MemoryKvStore::with_slot(NOTES_KEY, stored)));
        store.load().await;

        let id = store.add(draft("Roy", "Suivi")).await.unwrap();

        assert_eq!(store.get_by_id("1700000000001").unwrap().manager_name, "Roy");
        assert!(id.parse::<i64>().unwrap() > 1_700_000_000_001);
    }
}
