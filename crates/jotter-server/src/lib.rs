// ABOUTME: HTTP server for jotter, exposing note and task CRUD over a JSON file store.
// ABOUTME: Uses Axum with an API key guard, permissive CORS, and response timing.

pub mod api;
pub mod app_state;
pub mod auth;
pub mod config;
pub mod routes;
pub mod timing;

pub use app_state::{AppState, SharedState};
pub use config::{ConfigError, ServerConfig};
pub use routes::create_router;
