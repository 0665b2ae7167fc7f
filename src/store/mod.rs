//! File-backed document collections.
//!
//! A collection is a directory of pretty-printed JSON documents named
//! `<_id>.json`. Single-document writes are atomic (temp file + rename).
//! Multi-step read-modify-write sequences must hold [`Collection::lock`].

mod error;

pub use error::StoreError;

use crate::utils::{atomic_create, atomic_write};
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::{Mutex, MutexGuard};
use tracing::warn;

/// Most document files read at the same time by one scan.
const READ_CONCURRENCY: usize = 32;

/// A record stored in a [`Collection`].
pub trait Document: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Directory name of the collection under the data root.
    const COLLECTION: &'static str;

    /// Internal document identifier (`_id`).
    fn document_id(&self) -> &str;

    fn date_created(&self) -> DateTime<Utc>;
}

/// Mint a fresh internal document identifier.
#[must_use]
pub fn new_document_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

pub struct Collection<T> {
    dir: PathBuf,
    write_lock: Mutex<()>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Document> Collection<T> {
    /// Open the collection under `root`, creating its directory if needed.
    pub async fn open(root: &Path) -> Result<Self, StoreError> {
        let dir = root.join(T::COLLECTION);
        fs::create_dir_all(&dir).await?;
        Ok(Self {
            dir,
            write_lock: Mutex::new(()),
            _marker: PhantomData,
        })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Serialise read-modify-write sequences on this collection.
    pub async fn lock(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }

    fn document_path(&self, id: &str) -> Result<PathBuf, StoreError> {
        let valid = !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');
        if !valid {
            return Err(StoreError::InvalidId(id.to_string()));
        }
        Ok(self.dir.join(format!("{id}.json")))
    }

    /// Insert a new document. Fails if a document with the same `_id` exists.
    pub async fn insert(&self, doc: &T) -> Result<(), StoreError> {
        let path = self.document_path(doc.document_id())?;
        let content = serde_json::to_string_pretty(doc)?;
        atomic_create(&path, &content).await.map_err(|e| {
            if e.kind() == io::ErrorKind::AlreadyExists {
                StoreError::AlreadyExists(doc.document_id().to_string())
            } else {
                StoreError::IoError(e)
            }
        })
    }

    /// Get a document by `_id`.
    pub async fn get(&self, id: &str) -> Result<Option<T>, StoreError> {
        let path = self.document_path(id)?;
        match fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(serde_json::from_str(&content)?)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Paths of every document file in the collection.
    async fn document_paths(&self) -> Result<Vec<PathBuf>, StoreError> {
        let mut paths = Vec::new();
        let mut entries = fs::read_dir(&self.dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            let path = entry.path();
            if is_document_file(&path) {
                paths.push(path);
            }
        }
        Ok(paths)
    }

    /// Read one document file. `None` if it vanished or does not parse.
    async fn read_document(path: &Path) -> Result<Option<T>, StoreError> {
        let content = match fs::read_to_string(path).await {
            Ok(c) => c,
            // Removed between the directory scan and the read
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_str::<T>(&content) {
            Ok(doc) => Ok(Some(doc)),
            Err(e) => {
                warn!(
                    collection = T::COLLECTION,
                    path = %path.display(),
                    "Skipping unreadable document: {e}"
                );
                Ok(None)
            }
        }
    }

    /// List every readable document, oldest first.
    ///
    /// Files that are not valid documents are skipped with a warning.
    pub async fn list(&self) -> Result<Vec<T>, StoreError> {
        let mut reads = stream::iter(self.document_paths().await?)
            .map(|path| async move { Self::read_document(&path).await })
            .buffer_unordered(READ_CONCURRENCY);

        let mut docs = Vec::new();
        while let Some(read) = reads.next().await {
            if let Some(doc) = read? {
                docs.push(doc);
            }
        }

        docs.sort_by_key(|doc| doc.date_created());
        Ok(docs)
    }

    /// All documents matching `predicate`, oldest first.
    pub async fn find<P>(&self, predicate: P) -> Result<Vec<T>, StoreError>
    where
        P: Fn(&T) -> bool,
    {
        let mut docs = self.list().await?;
        docs.retain(|doc| predicate(doc));
        Ok(docs)
    }

    /// A document matching `predicate`, for lookups by a unique key.
    ///
    /// Stops reading at the first match.
    pub async fn find_one<P>(&self, predicate: P) -> Result<Option<T>, StoreError>
    where
        P: Fn(&T) -> bool,
    {
        let mut reads = stream::iter(self.document_paths().await?)
            .map(|path| async move { Self::read_document(&path).await })
            .buffer_unordered(READ_CONCURRENCY);

        while let Some(read) = reads.next().await {
            if let Some(doc) = read? {
                if predicate(&doc) {
                    return Ok(Some(doc));
                }
            }
        }
        Ok(None)
    }

    /// Replace an existing document with the same `_id`.
    pub async fn replace(&self, doc: &T) -> Result<(), StoreError> {
        let path = self.document_path(doc.document_id())?;
        if !fs::try_exists(&path).await? {
            return Err(StoreError::NotFound(doc.document_id().to_string()));
        }
        let content = serde_json::to_string_pretty(doc)?;
        atomic_write(&path, &content).await?;
        Ok(())
    }

    /// Remove a document, returning it if it existed.
    pub async fn remove(&self, id: &str) -> Result<Option<T>, StoreError> {
        let Some(doc) = self.get(id).await? else {
            return Ok(None);
        };
        let path = self.document_path(id)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(Some(doc)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// Check if a path is a document file (not a hidden temp file).
fn is_document_file(path: &Path) -> bool {
    let visible = path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| !n.starts_with('.'));
    visible
        && path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        #[serde(rename = "_id")]
        id: String,
        text: String,
        date_created: DateTime<Utc>,
    }

    impl Document for Note {
        const COLLECTION: &'static str = "notes";

        fn document_id(&self) -> &str {
            &self.id
        }

        fn date_created(&self) -> DateTime<Utc> {
            self.date_created
        }
    }

    fn note(text: &str, created: DateTime<Utc>) -> Note {
        Note {
            id: new_document_id(),
            text: text.to_string(),
            date_created: created,
        }
    }

    #[tokio::test]
    async fn test_insert_get_roundtrip() {
        let temp = TempDir::new().unwrap();
        let notes = Collection::<Note>::open(temp.path()).await.unwrap();
        let doc = note("hello", Utc::now());

        notes.insert(&doc).await.unwrap();

        assert!(notes.dir().ends_with("notes"));
        assert_eq!(notes.get(&doc.id).await.unwrap(), Some(doc));
    }

    #[tokio::test]
    async fn test_insert_duplicate_id_fails() {
        let temp = TempDir::new().unwrap();
        let notes = Collection::<Note>::open(temp.path()).await.unwrap();
        let doc = note("first", Utc::now());
        notes.insert(&doc).await.unwrap();

        let mut clash = doc.clone();
        clash.text = "second".to_string();
        let err = notes.insert(&clash).await.unwrap_err();

        assert!(matches!(err, StoreError::AlreadyExists(_)));
        assert_eq!(notes.get(&doc.id).await.unwrap().unwrap().text, "first");
    }

    #[tokio::test]
    async fn test_list_sorted_by_creation_and_skips_junk() {
        let temp = TempDir::new().unwrap();
        let notes = Collection::<Note>::open(temp.path()).await.unwrap();
        let now = Utc::now();
        notes.insert(&note("newer", now)).await.unwrap();
        notes
            .insert(&note("older", now - Duration::seconds(10)))
            .await
            .unwrap();
        std::fs::write(notes.dir().join("broken.json"), "{").unwrap();
        std::fs::write(notes.dir().join("readme.txt"), "ignored").unwrap();

        let texts: Vec<String> = notes
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|n| n.text)
            .collect();
        assert_eq!(texts, vec!["older".to_string(), "newer".to_string()]);
    }

    #[tokio::test]
    async fn test_find_and_find_one() {
        let temp = TempDir::new().unwrap();
        let notes = Collection::<Note>::open(temp.path()).await.unwrap();
        notes.insert(&note("apple", Utc::now())).await.unwrap();
        notes.insert(&note("banana", Utc::now())).await.unwrap();

        let found = notes.find(|n| n.text.starts_with('b')).await.unwrap();
        assert_eq!(found.len(), 1);
        assert!(notes.find_one(|n| n.text == "cherry").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_scans_collections_larger_than_read_window() {
        let temp = TempDir::new().unwrap();
        let notes = Collection::<Note>::open(temp.path()).await.unwrap();
        let start = Utc::now();
        let total = READ_CONCURRENCY * 2 + 5;
        for i in 0..total {
            let created = start + Duration::seconds(i64::try_from(i).unwrap());
            notes.insert(&note(&format!("note-{i}"), created)).await.unwrap();
        }
        std::fs::write(notes.dir().join("broken.json"), "{").unwrap();

        let listed = notes.list().await.unwrap();
        assert_eq!(listed.len(), total);
        assert_eq!(listed.first().unwrap().text, "note-0");
        assert_eq!(listed.last().unwrap().text, format!("note-{}", total - 1));

        let target = format!("note-{}", total - 3);
        let found = notes.find_one(|n| n.text == target).await.unwrap();
        assert_eq!(found.unwrap().text, target);
        assert!(notes.find_one(|n| n.text == "absent").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_replace_requires_existing_document() {
        let temp = TempDir::new().unwrap();
        let notes = Collection::<Note>::open(temp.path()).await.unwrap();
        let mut doc = note("draft", Utc::now());

        let err = notes.replace(&doc).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));

        notes.insert(&doc).await.unwrap();
        doc.text = "final".to_string();
        notes.replace(&doc).await.unwrap();
        assert_eq!(notes.get(&doc.id).await.unwrap().unwrap().text, "final");
    }

    #[tokio::test]
    async fn test_remove_returns_document_once() {
        let temp = TempDir::new().unwrap();
        let notes = Collection::<Note>::open(temp.path()).await.unwrap();
        let doc = note("bye", Utc::now());
        notes.insert(&doc).await.unwrap();

        assert_eq!(notes.remove(&doc.id).await.unwrap(), Some(doc.clone()));
        assert_eq!(notes.remove(&doc.id).await.unwrap(), None);
        assert!(notes.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_path_traversal_ids_rejected() {
        let temp = TempDir::new().unwrap();
        let notes = Collection::<Note>::open(temp.path()).await.unwrap();

        let err = notes.get("../secrets").await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidId(_)));
    }
}
