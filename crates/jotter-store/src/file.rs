// ABOUTME: Single-file JSON store holding one serialized record collection.
// ABOUTME: Creates the blob on first use and saves with atomic write-then-rename.

use std::fs::{self, File};
use std::io::Write;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use jotter_core::{Collection, Payload};
use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("corrupt store at {path}: {source}")]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// One collection persisted as a single JSON file. Every `load` re-reads the
/// file and every `save` rewrites it in full; there is no caching layer.
pub struct FileStore<P> {
    path: PathBuf,
    _payload: PhantomData<P>,
}

impl<P: Payload> FileStore<P> {
    /// Create a store handle for the given path. The file itself is not
    /// touched until `ensure`, `load`, or `save`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _payload: PhantomData,
        }
    }

    /// Returns the path to the underlying JSON file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write an empty collection if the file does not exist. Idempotent;
    /// existing contents are not inspected.
    pub fn ensure(&self) -> Result<(), StoreError> {
        if self.path.exists() {
            return Ok(());
        }
        self.write_blob(&Collection::empty())
    }

    /// Read and deserialize the whole collection, creating it first if needed.
    /// Unparseable contents surface as `StoreError::Corrupt`.
    pub fn load(&self) -> Result<Collection<P>, StoreError> {
        self.ensure()?;
        let contents = fs::read_to_string(&self.path)?;
        serde_json::from_str(&contents).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    /// Serialize the whole collection and replace the file contents.
    pub fn save(&self, collection: &Collection<P>) -> Result<(), StoreError> {
        self.write_blob(collection)
    }

    /// Atomic write: serialize to a sibling .tmp path, fsync, then rename
    /// over the target. A crash mid-write leaves the old file intact.
    fn write_blob(&self, collection: &Collection<P>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(collection)?;

        let tmp_path = self.path.with_extension("json.tmp");
        let mut file = File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;
        drop(file);

        fs::rename(&tmp_path, &self.path)?;

        // Fsync the parent directory so the rename metadata is durable.
        // Best-effort: if this fails, the rename already succeeded and the
        // data is consistent.
        if let Some(parent) = self.path.parent()
            && let Ok(dir) = File::open(parent)
        {
            let _ = dir.sync_all();
        }

        Ok(())
    }
}
