// ABOUTME: Shared application state for the jotter HTTP server.
// ABOUTME: Holds the notes and tasks engines behind an Arc for Axum handlers.

use std::path::Path;
use std::sync::Arc;

use jotter_core::{NotePayload, TaskPayload};
use jotter_store::{Engine, FileStore, StoreError};

/// Shared application state accessible by all Axum handlers: one engine per
/// resource family, each backed by its own data file.
pub struct AppState {
    pub notes: Engine<NotePayload>,
    pub tasks: Engine<TaskPayload>,
}

/// Type alias for the Arc-wrapped state used with Axum's State extractor.
pub type SharedState = Arc<AppState>;

impl AppState {
    /// Build both engines rooted in the given data directory, creating the
    /// empty data files on first use.
    pub fn new(data_dir: &Path) -> Result<Self, StoreError> {
        Ok(Self {
            notes: Engine::new(FileStore::new(data_dir.join("notes.json")))?,
            tasks: Engine::new(FileStore::new(data_dir.join("tasks.json")))?,
        })
    }
}
