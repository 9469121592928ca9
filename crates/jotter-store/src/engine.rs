// ABOUTME: Query and mutation operations over one stored record collection.
// ABOUTME: A reader-writer lock serializes mutations against each other and against reads.

use jotter_core::{Collection, Draft, ListQuery, Page, Payload, Record, now_timestamp, run_query};
use thiserror::Error;
use tokio::sync::RwLock;

use crate::file::{FileStore, StoreError};

/// Errors that can occur during engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("no record with id {0}")]
    NotFound(u64),
}

/// Serialized access to one stored collection. Queries share the read lock
/// and mutations take the write lock, so a reader never observes a
/// half-applied mutation.
pub struct Engine<P> {
    store: RwLock<FileStore<P>>,
}

impl<P: Payload> Engine<P> {
    /// Wrap a store, creating its empty blob on first use.
    pub fn new(store: FileStore<P>) -> Result<Self, StoreError> {
        store.ensure()?;
        Ok(Self {
            store: RwLock::new(store),
        })
    }

    /// Filter, sort, and paginate the collection. Read-only.
    pub async fn list(&self, query: &ListQuery) -> Result<Page<Record<P>>, EngineError> {
        let store = self.store.read().await;
        let collection = store.load()?;
        Ok(run_query(collection.records, query))
    }

    /// Fetch a single record by id. Read-only.
    pub async fn get(&self, id: u64) -> Result<Record<P>, EngineError> {
        let store = self.store.read().await;
        let collection = store.load()?;
        collection
            .records
            .into_iter()
            .find(|r| r.id == id)
            .ok_or(EngineError::NotFound(id))
    }

    /// Append a new record, assigning the next id and the current wall-clock
    /// timestamp. The id counter only moves forward, so ids are never reused
    /// even after removals.
    pub async fn create(&self, draft: Draft<P>) -> Result<Record<P>, EngineError> {
        let store = self.store.write().await;
        let mut collection = store.load()?;

        let record = Record {
            id: collection.next_id,
            created_at: now_timestamp(),
            title: draft.title,
            payload: draft.payload,
        };
        collection.next_id += 1;
        collection.records.push(record.clone());
        store.save(&collection)?;

        tracing::debug!(id = record.id, "created record");
        Ok(record)
    }

    /// Overwrite every caller-controlled field of an existing record,
    /// preserving its id, creation time, and position in the sequence.
    pub async fn replace(&self, id: u64, draft: Draft<P>) -> Result<Record<P>, EngineError> {
        let store = self.store.write().await;
        let mut collection = store.load()?;

        let index = collection.position(id).ok_or(EngineError::NotFound(id))?;
        let record = Record {
            id,
            created_at: collection.records[index].created_at,
            title: draft.title,
            payload: draft.payload,
        };
        collection.records[index] = record.clone();
        store.save(&collection)?;

        Ok(record)
    }

    /// Remove a record by id. Later records keep their relative order.
    pub async fn remove(&self, id: u64) -> Result<(), EngineError> {
        let store = self.store.write().await;
        let mut collection = store.load()?;

        let index = collection.position(id).ok_or(EngineError::NotFound(id))?;
        collection.records.remove(index);
        store.save(&collection)?;

        tracing::debug!(id, "removed record");
        Ok(())
    }

    /// Snapshot of the raw collection, in insertion order. Test and
    /// diagnostic use; the HTTP layer goes through `list`.
    pub async fn dump(&self) -> Result<Collection<P>, EngineError> {
        let store = self.store.read().await;
        Ok(store.load()?)
    }
}
