// ABOUTME: API module containing all HTTP handler functions for the jotter REST API.
// ABOUTME: Organized into sub-modules for note CRUD, task CRUD, and error mapping.

pub mod error;
pub mod notes;
pub mod tasks;
