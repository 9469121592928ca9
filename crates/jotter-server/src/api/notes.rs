// ABOUTME: Note CRUD handlers: list with search/sort/pagination, fetch, create, replace, delete.
// ABOUTME: Validates payloads at the boundary; the engine trusts its inputs.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use jotter_core::{
    DEFAULT_LIMIT, Draft, ListQuery, MAX_LIMIT, NotePayload, Page, Record, SortDirection,
};
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::app_state::SharedState;

/// Query-string parameters accepted by the note list endpoint.
#[derive(Debug, Deserialize)]
pub struct NoteListParams {
    q: Option<String>,
    sort: Option<String>,
    limit: Option<usize>,
    offset: Option<usize>,
}

impl NoteListParams {
    fn into_query(self) -> ListQuery {
        ListQuery {
            q: self.q.filter(|q| !q.is_empty()),
            sort: SortDirection::from_param(self.sort.as_deref().unwrap_or("desc")),
            done: None,
            limit: self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
            offset: self.offset.unwrap_or(0),
        }
    }
}

/// GET /notes - filtered, sorted, paginated page of notes.
pub async fn list_notes(
    State(state): State<SharedState>,
    Query(params): Query<NoteListParams>,
) -> Result<Json<Page<Record<NotePayload>>>, ApiError> {
    let page = state.notes.list(&params.into_query()).await?;
    Ok(Json(page))
}

/// GET /notes/{id} - fetch one note.
pub async fn get_note(
    State(state): State<SharedState>,
    Path(id): Path<u64>,
) -> Result<Json<Record<NotePayload>>, ApiError> {
    Ok(Json(state.notes.get(id).await?))
}

/// POST /notes - create a note.
pub async fn create_note(
    State(state): State<SharedState>,
    Json(draft): Json<Draft<NotePayload>>,
) -> Result<impl IntoResponse, ApiError> {
    draft.validate()?;
    let record = state.notes.create(draft).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// PUT /notes/{id} - full replace; id and created_at are preserved.
pub async fn replace_note(
    State(state): State<SharedState>,
    Path(id): Path<u64>,
    Json(draft): Json<Draft<NotePayload>>,
) -> Result<Json<Record<NotePayload>>, ApiError> {
    draft.validate()?;
    Ok(Json(state.notes.replace(id, draft).await?))
}

/// DELETE /notes/{id}
pub async fn delete_note(
    State(state): State<SharedState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    state.notes.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
