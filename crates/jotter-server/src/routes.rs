// ABOUTME: Route definitions and middleware assembly for the jotter HTTP API.
// ABOUTME: Builds a single Axum Router covering health, notes, and tasks.

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::app_state::SharedState;
use crate::auth::ApiKeyLayer;
use crate::timing;

/// Build the complete Axum router with all routes, middleware, and shared
/// state. With `api_key = None` the key guard is skipped, for embedding and
/// tests that exercise the handlers directly.
pub fn create_router(state: SharedState, api_key: Option<String>) -> Router {
    let mut router = Router::new()
        .route("/health", get(health))
        .route(
            "/notes",
            get(api::notes::list_notes).post(api::notes::create_note),
        )
        .route(
            "/notes/{id}",
            get(api::notes::get_note)
                .put(api::notes::replace_note)
                .delete(api::notes::delete_note),
        )
        .route(
            "/tasks",
            get(api::tasks::list_tasks).post(api::tasks::create_task),
        )
        .route(
            "/tasks/{id}",
            get(api::tasks::get_task)
                .put(api::tasks::replace_task)
                .delete(api::tasks::delete_task),
        );

    if let Some(key) = api_key {
        router = router.layer(ApiKeyLayer::new(key));
    }

    router
        .layer(axum::middleware::from_fn(timing::timing_header))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check handler. Returns 200 OK with a simple JSON body.
async fn health() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "status": "ok" }))
}
