// ABOUTME: Core library for jotter, containing the record model and query pipeline.
// ABOUTME: This crate defines the shared data model used across all jotter components.

pub mod model;
pub mod query;

pub use model::{
    Collection, Draft, NotePayload, Payload, Record, TaskPayload, ValidationError, now_timestamp,
};
pub use query::{DEFAULT_LIMIT, ListQuery, MAX_LIMIT, Page, SortDirection, run_query};
