/// Authentication API routes
use crate::{
    error::Result,
    services::registration,
    state::AppState,
    validation::{json_body, RegisterInput},
};
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub token: String,
}

/// POST /register
/// Exchange a provider authorization code for a session token
pub async fn register(
    State(app_state): State<AppState>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<RegisterResponse>> {
    let input = RegisterInput::from_json(&json_body(body)?)?;

    let token = registration::register(
        app_state.identity.as_ref(),
        app_state.storage.as_ref(),
        &app_state.sessions,
        &input.code,
    )
    .await?;

    Ok(Json(RegisterResponse { token }))
}
