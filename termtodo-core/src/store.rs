//! Key-value store abstraction and implementations.
//!
//! The application core is storage-agnostic: it talks to a
//! [`KeyValueStore`] and never touches the filesystem directly.
//! [`FileStore`] is the production implementation (one file per key
//! under a root directory); [`MemoryStore`] backs tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Errors produced by a [`KeyValueStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Failed to read a store entry.
    #[error("failed to read store entry {key}: {source}")]
    Read {
        /// Entry key that was attempted.
        key: String,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// Failed to write a store entry.
    #[error("failed to write store entry {key}: {source}")]
    Write {
        /// Entry key that was attempted.
        key: String,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// Failed to remove a store entry.
    #[error("failed to remove store entry {key}: {source}")]
    Remove {
        /// Entry key that was attempted.
        key: String,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// Failed to create the store's root directory.
    #[error("failed to create store directory {path}: {source}")]
    CreateDir {
        /// Directory that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
}

/// Durable string-keyed storage.
///
/// Absence of a key is not an error: `get` returns `Ok(None)` and
/// `remove` of a missing key succeeds.
pub trait KeyValueStore {
    /// Returns the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Read`] if the entry exists but cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Write`] if the entry cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removes the entry under `key`. Removing a missing key is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Remove`] if the entry exists but cannot be
    /// removed.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// In-memory store for tests.
///
/// Clones share the same underlying map, so a test can keep a handle
/// while the list manager owns another and observe writes through it.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether an entry exists under `key`.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// File-backed store: each key maps to `<root>/<key>.json`.
#[derive(Debug)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Opens a file store rooted at `root`, creating the directory if
    /// needed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::CreateDir`] if the root directory cannot
    /// be created.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        std::fs::create_dir_all(&root).map_err(|e| StoreError::CreateDir {
            path: root.clone(),
            source: e,
        })?;
        Ok(Self { root })
    }

    /// Returns the root directory of this store.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(self.entry_path(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Read {
                key: key.to_string(),
                source: e,
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        std::fs::write(self.entry_path(key), value).map_err(|e| StoreError::Write {
            key: key.to_string(),
            source: e,
        })
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        match std::fs::remove_file(self.entry_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Remove {
                key: key.to_string(),
                source: e,
            }),
        }
    }
}
