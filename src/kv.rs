//! Key-value persistence slots.
//!
//! Everything meetlog keeps on disk lives under a handful of fixed string keys.
//! The [`KeyValueStore`] trait is the only persistence capability the note and
//! preference stores depend on.
use std::{
    collections::HashMap,
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use log::{debug, error, trace};
use tempfile::NamedTempFile;
use tokio::sync::Mutex;

use crate::{MeetlogError, Result};

/// Slot holding the JSON array of notes.
pub const NOTES_KEY: &str = "@10008_notes";

/// Slot holding the theme mode (`light`, `dark` or `system`).
pub const THEME_KEY: &str = "themeMode";

/// Slot holding the language code (`fr` or `en`).
pub const LANGUAGE_KEY: &str = "user-language";

/// An asynchronous string store addressed by fixed keys.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` if the slot is empty.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the value stored under `key`.
    async fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Stores each key as its own file inside a directory.
#[derive(Debug, Clone)]
pub struct FileKvStore {
    dir: PathBuf,
}

impl FileKvStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Maps a key onto a file name inside the store directory.
    ///
    /// Anything outside `[A-Za-z0-9_-]` is replaced so keys such as
    /// `@10008_notes` can never escape the directory.
    fn key_path(&self, key: &str) -> PathBuf {
        let file_name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();

        self.dir.join(format!("{}.json", file_name))
    }
}

#[async_trait]
impl KeyValueStore for FileKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        trace!("Reading slot '{}' from {}", key, path.display());

        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => {
                error!("Failed to read slot file {}: {}", path.display(), e);
                Err(MeetlogError::Io(e))
            }
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let dir = self.dir.clone();
        let path = self.key_path(key);
        let value = value.to_string();
        debug!("Writing slot '{}' to {}", key, path.display());

        tokio::task::spawn_blocking(move || write_atomically(&dir, &path, &value))
            .await
            .map_err(|e| {
                error!("Slot write task failed: {}", e);
                MeetlogError::Io(std::io::Error::other(e))
            })??;

        trace!("Slot '{}' written", key);
        Ok(())
    }
}

/// Writes into a sibling temp file, then moves it over the target.
fn write_atomically(dir: &Path, path: &Path, value: &str) -> Result<()> {
    if !dir.exists() {
        debug!("Creating store directory: {}", dir.display());
        fs::create_dir_all(dir).map_err(|e| {
            error!("Failed to create store directory: {}", e);
            MeetlogError::DirectoryError {
                path: dir.to_path_buf(),
            }
        })?;
    }

    let mut temp_file = NamedTempFile::new_in(dir).map_err(|e| {
        error!("Failed to create temporary file: {}", e);
        MeetlogError::Io(e)
    })?;

    temp_file.write_all(value.as_bytes()).map_err(|e| {
        error!("Failed to write to temporary file: {}", e);
        MeetlogError::Io(e)
    })?;

    temp_file.flush()?;

    temp_file.persist(path).map_err(|e| {
        error!("Failed to persist file {}: {}", path.display(), e.error);
        MeetlogError::Io(e.error)
    })?;

    Ok(())
}

/// Keeps every slot in memory. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store with one slot already filled.
    pub fn with_slot(key: &str, value: &str) -> Self {
        let mut slots = HashMap::new();
        slots.insert(key.to_string(), value.to_string());
        Self {
            slots: Mutex::new(slots),
        }
    }
}

#[async_trait]
impl KeyValueStore for MemoryKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.slots
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Reads as empty and refuses every write.
#[cfg(test)]
pub(crate) struct ReadOnlyKvStore;

#[cfg(test)]
#[async_trait]
impl KeyValueStore for ReadOnlyKvStore {
    async fn get(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<()> {
        Err(MeetlogError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "storage unavailable",
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_file_store_missing_key_is_none() {
        let dir = TempDir::new().unwrap();
        let store = FileKvStore::new(dir.path());

        assert_eq!(store.get(NOTES_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_file_store_set_then_get() {
        let dir = TempDir::new().unwrap();
        let store = FileKvStore::new(dir.path().join("nested"));

        store.set(THEME_KEY, "dark").await.unwrap();
        store.set(THEME_KEY, "light").await.unwrap();

        assert_eq!(
            store.get(THEME_KEY).await.unwrap(),
            Some("light".to_string())
        );
    }

    #[tokio::test]
    async fn test_file_store_write_into_a_file_path_fails() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "x").unwrap();
        let store = FileKvStore::new(&blocker);

        assert!(store.set(THEME_KEY, "dark").await.is_err());
    }

    #[test]
    fn test_key_path_is_sanitized() {
        let store = FileKvStore::new("/data");
        let path = store.key_path("../@10008 notes");

        assert_eq!(path, PathBuf::from("/data/____10008_notes.json"));
    }

    #[tokio::test]
    async fn test_memory_store_slots_are_independent() {
        let store = MemoryKvStore::with_slot(LANGUAGE_KEY, "en");
        store.set(THEME_KEY, "dark").await.unwrap();

        assert_eq!(store.get(LANGUAGE_KEY).await.unwrap(), Some("en".into()));
        assert_eq!(store.get(THEME_KEY).await.unwrap(), Some("dark".into()));
        assert_eq!(store.get(NOTES_KEY).await.unwrap(), None);
    }
}
