//! Notes CRUD. Every handler takes [`CurrentUser`], so anonymous requests
//! never reach the repository, and every repository call is scoped to the
//! caller's id. A note owned by somebody else is indistinguishable from a
//! note that does not exist.

use axum::{
    extract::{Form, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use notesync_core::notes::{validate_content, Note, NoteId};
use notesync_core::storage::RepositoryError;

use crate::handlers::AppError;
use crate::models::{ListNotesQuery, NotePayload};
use crate::session::CurrentUser;
use crate::state::AppState;

fn note_not_found(note_id: NoteId) -> AppError {
    RepositoryError::NotFound {
        entity_type: "Note",
        id: note_id.to_string(),
    }
    .into()
}

/// GET /notes - list the caller's notes, newest first. An optional `q`
/// parameter filters by case-insensitive substring match.
#[axum::debug_handler]
pub async fn list_notes(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(params): Query<ListNotesQuery>,
) -> Result<Json<Vec<Note>>, AppError> {
    let query = params
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty());

    let notes = state.notes.list_notes(user.id, query).await?;
    Ok(Json(notes))
}

/// POST /notes - create a note owned by the caller.
#[axum::debug_handler]
pub async fn create_note(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Form(payload): Form<NotePayload>,
) -> Result<impl IntoResponse, AppError> {
    let content = validate_content(&payload.content)?;
    let note = state.notes.create_note(user.id, &content).await?;

    tracing::debug!(user_id = user.id, note_id = note.id, "Created note");

    Ok((StatusCode::CREATED, Json(note)))
}

/// GET /notes/{id} - fetch a single note owned by the caller.
#[axum::debug_handler]
pub async fn get_note(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(note_id): Path<NoteId>,
) -> Result<Json<Note>, AppError> {
    let note = state
        .notes
        .get_note(user.id, note_id)
        .await?
        .ok_or_else(|| note_not_found(note_id))?;
    Ok(Json(note))
}

/// PUT /notes/{id} - replace the content of a note owned by the caller. The
/// note's timestamp moves forward to the time of the edit.
#[axum::debug_handler]
pub async fn update_note(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(note_id): Path<NoteId>,
    Form(payload): Form<NotePayload>,
) -> Result<Json<Note>, AppError> {
    let content = validate_content(&payload.content)?;
    let note = state
        .notes
        .update_note(user.id, note_id, &content)
        .await?
        .ok_or_else(|| note_not_found(note_id))?;

    tracing::debug!(user_id = user.id, note_id, "Updated note");

    Ok(Json(note))
}

/// DELETE /notes/{id} - remove a note owned by the caller.
#[axum::debug_handler]
pub async fn delete_note(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(note_id): Path<NoteId>,
) -> Result<impl IntoResponse, AppError> {
    let deleted = state.notes.delete_note(user.id, note_id).await?;
    if !deleted {
        return Err(note_not_found(note_id));
    }

    tracing::debug!(user_id = user.id, note_id, "Deleted note");

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({ "message": "Note deleted" })),
    ))
}
