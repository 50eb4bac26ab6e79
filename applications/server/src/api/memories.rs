/// Memories API routes
use crate::{
    error::{Result, ServerError},
    middleware::AuthenticatedUser,
    state::AppState,
    validation::{json_body, memory_id, MemoryInput},
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use capsule_core::types::{Memory, MemorySummary};
use serde_json::Value;

/// GET /memories
/// All memories, oldest first, reduced to id, cover and excerpt
pub async fn list_memories(
    State(app_state): State<AppState>,
    _auth: AuthenticatedUser,
) -> Result<Json<Vec<MemorySummary>>> {
    let memories = app_state.storage.list_memories().await?;
    Ok(Json(memories.into_iter().map(MemorySummary::from).collect()))
}

/// GET /memories/:id
pub async fn get_memory(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    _auth: AuthenticatedUser,
) -> Result<Json<Memory>> {
    let id = memory_id(&id)?;
    let memory = app_state.storage.get_memory(&id).await?;
    Ok(Json(memory))
}

/// POST /memories
/// Create a memory owned by the caller
pub async fn create_memory(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<Memory>> {
    let input = MemoryInput::from_json(&json_body(body)?)?;

    // A valid token can outlive its user (e.g. after the database was reset)
    let memory = app_state
        .storage
        .create_memory(input.into_create(auth.user_id().clone()))
        .await
        .map_err(|e| {
            if e.is_invalid_reference() {
                ServerError::Auth("Session user no longer exists".to_string())
            } else {
                e.into()
            }
        })?;

    tracing::info!(memory_id = %memory.id, user_id = %auth.user_id(), "Memory created");
    Ok(Json(memory))
}

/// PUT /memories/:id
/// Replace content, cover and visibility
pub async fn update_memory(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<Memory>> {
    let id = memory_id(&id)?;
    let input = MemoryInput::from_json(&json_body(body)?)?;

    // TODO: Check ownership once multi-user memories are decided on
    let memory = app_state
        .storage
        .update_memory(&id, input.into_update())
        .await?;

    tracing::info!(memory_id = %id, user_id = %auth.user_id(), "Memory updated");
    Ok(Json(memory))
}

/// DELETE /memories/:id
pub async fn delete_memory(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<StatusCode> {
    let id = memory_id(&id)?;

    app_state.storage.delete_memory(&id).await?;

    tracing::info!(memory_id = %id, user_id = %auth.user_id(), "Memory deleted");
    Ok(StatusCode::NO_CONTENT)
}
