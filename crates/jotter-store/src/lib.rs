// ABOUTME: Persistence layer for jotter: the JSON file store and the record engine.
// ABOUTME: Provides atomic collection storage and lock-serialized query/mutation operations.

pub mod engine;
pub mod file;

pub use engine::{Engine, EngineError};
pub use file::{FileStore, StoreError};
