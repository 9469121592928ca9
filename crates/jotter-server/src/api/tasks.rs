// ABOUTME: Task CRUD handlers: list with search/sort/done filter/pagination, fetch, create, replace, delete.
// ABOUTME: Mirrors the note handlers with the task payload shape.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use jotter_core::{
    DEFAULT_LIMIT, Draft, ListQuery, MAX_LIMIT, Page, Record, SortDirection, TaskPayload,
};
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::app_state::SharedState;

/// Query-string parameters accepted by the task list endpoint.
#[derive(Debug, Deserialize)]
pub struct TaskListParams {
    q: Option<String>,
    sort: Option<String>,
    done: Option<bool>,
    limit: Option<usize>,
    offset: Option<usize>,
}

impl TaskListParams {
    fn into_query(self) -> ListQuery {
        ListQuery {
            q: self.q.filter(|q| !q.is_empty()),
            sort: SortDirection::from_param(self.sort.as_deref().unwrap_or("desc")),
            done: self.done,
            limit: self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
            offset: self.offset.unwrap_or(0),
        }
    }
}

/// GET /tasks - filtered, sorted, paginated page of tasks.
pub async fn list_tasks(
    State(state): State<SharedState>,
    Query(params): Query<TaskListParams>,
) -> Result<Json<Page<Record<TaskPayload>>>, ApiError> {
    let page = state.tasks.list(&params.into_query()).await?;
    Ok(Json(page))
}

/// GET /tasks/{id} - fetch one task.
pub async fn get_task(
    State(state): State<SharedState>,
    Path(id): Path<u64>,
) -> Result<Json<Record<TaskPayload>>, ApiError> {
    Ok(Json(state.tasks.get(id).await?))
}

/// POST /tasks - create a task.
pub async fn create_task(
    State(state): State<SharedState>,
    Json(draft): Json<Draft<TaskPayload>>,
) -> Result<impl IntoResponse, ApiError> {
    draft.validate()?;
    let record = state.tasks.create(draft).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// PUT /tasks/{id} - full replace; id and created_at are preserved.
pub async fn replace_task(
    State(state): State<SharedState>,
    Path(id): Path<u64>,
    Json(draft): Json<Draft<TaskPayload>>,
) -> Result<Json<Record<TaskPayload>>, ApiError> {
    draft.validate()?;
    Ok(Json(state.tasks.replace(id, draft).await?))
}

/// DELETE /tasks/{id}
pub async fn delete_task(
    State(state): State<SharedState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    state.tasks.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use crate::app_state::AppState;
    use crate::routes::create_router;
    use axum::body::Body;
    use http::Request;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_state() -> crate::app_state::SharedState {
        let dir = tempfile::TempDir::new().unwrap();
        Arc::new(AppState::new(&dir.keep()).unwrap())
    }

    async fn json_body(resp: axum::response::Response) -> serde_json::Value {
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    fn post_task(body: serde_json::Value) -> Request<Body> {
        Request::post("/tasks")
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap()
    }

    #[tokio::test]
    async fn create_task_defaults_done_and_labels() {
        let app = create_router(test_state(), None);

        let resp = app
            .oneshot(post_task(
                serde_json::json!({ "title": "Water plants", "priority": 2 }),
            ))
            .await
            .unwrap();

        assert_eq!(resp.status(), 201);
        let json = json_body(resp).await;
        assert_eq!(json["done"], false);
        assert_eq!(json["labels"], serde_json::json!([]));
        // Absent due_date is omitted, not null
        assert!(json.get("due_date").is_none());
    }

    #[tokio::test]
    async fn create_task_accepts_due_date() {
        let app = create_router(test_state(), None);

        let resp = app
            .oneshot(post_task(serde_json::json!({
                "title": "File taxes",
                "priority": 5,
                "due_date": "2026-04-15"
            })))
            .await
            .unwrap();

        assert_eq!(resp.status(), 201);
        let json = json_body(resp).await;
        assert_eq!(json["due_date"], "2026-04-15");
    }

    #[tokio::test]
    async fn priority_out_of_range_returns_422() {
        let app = create_router(test_state(), None);

        let resp = app
            .oneshot(post_task(
                serde_json::json!({ "title": "Bad", "priority": 9 }),
            ))
            .await
            .unwrap();

        assert_eq!(resp.status(), 422);
        let json = json_body(resp).await;
        assert!(json["error"].as_str().unwrap().starts_with("priority:"));
    }

    #[tokio::test]
    async fn done_filter_narrows_list() {
        let state = test_state();

        for (title, done) in [("Open task", false), ("Done task", true)] {
            let app = create_router(Arc::clone(&state), None);
            let resp = app
                .oneshot(post_task(serde_json::json!({
                    "title": title,
                    "priority": 1,
                    "done": done
                })))
                .await
                .unwrap();
            assert_eq!(resp.status(), 201);
        }

        let app = create_router(Arc::clone(&state), None);
        let resp = app
            .oneshot(
                Request::get("/tasks?done=true")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let json = json_body(resp).await;
        assert_eq!(json["total"], 1);
        assert_eq!(json["items"][0]["title"], "Done task");
    }

    #[tokio::test]
    async fn filter_matches_labels() {
        let state = test_state();

        let app = create_router(Arc::clone(&state), None);
        app.oneshot(post_task(serde_json::json!({
            "title": "Call plumber",
            "priority": 3,
            "labels": ["Home", "urgent"]
        })))
        .await
        .unwrap();

        let app = create_router(Arc::clone(&state), None);
        let resp = app
            .oneshot(Request::get("/tasks?q=home").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let json = json_body(resp).await;
        assert_eq!(json["total"], 1);
    }

    #[tokio::test]
    async fn sort_asc_orders_by_creation() {
        let state = test_state();

        for title in ["Oldest", "Newest"] {
            let app = create_router(Arc::clone(&state), None);
            app.oneshot(post_task(
                serde_json::json!({ "title": title, "priority": 1 }),
            ))
            .await
            .unwrap();
        }

        let app = create_router(Arc::clone(&state), None);
        let resp = app
            .oneshot(Request::get("/tasks?sort=asc").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let json = json_body(resp).await;
        assert_eq!(json["items"][0]["title"], "Oldest");
        assert_eq!(json["items"][1]["title"], "Newest");
    }

    #[tokio::test]
    async fn replace_overwrites_all_caller_fields() {
        let state = test_state();

        let app = create_router(Arc::clone(&state), None);
        app.oneshot(post_task(serde_json::json!({
            "title": "Draft",
            "priority": 1,
            "due_date": "2026-01-01"
        })))
        .await
        .unwrap();

        let app = create_router(Arc::clone(&state), None);
        let resp = app
            .oneshot(
                Request::put("/tasks/1")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        serde_json::to_vec(&serde_json::json!({
                            "title": "Final",
                            "priority": 4,
                            "done": true
                        }))
                        .unwrap(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), 200);
        let json = json_body(resp).await;
        assert_eq!(json["title"], "Final");
        assert_eq!(json["done"], true);
        // The replacement draft had no due date, so it is gone
        assert!(json.get("due_date").is_none());
    }

    #[tokio::test]
    async fn delete_then_fetch_returns_404() {
        let state = test_state();

        let app = create_router(Arc::clone(&state), None);
        app.oneshot(post_task(
            serde_json::json!({ "title": "Temp", "priority": 1 }),
        ))
        .await
        .unwrap();

        let app = create_router(Arc::clone(&state), None);
        let resp = app
            .oneshot(Request::delete("/tasks/1").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), 204);

        let app = create_router(Arc::clone(&state), None);
        let resp = app
            .oneshot(Request::get("/tasks/1").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), 404);
    }
}
