//! Preset endpoints

use crate::domain::model::{PresetTargets, PresetsDump};
use crate::web::error::HttpError;
use crate::web::extract::ApiJson;
use crate::web::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct PresetRequest {
    pub servos: PresetTargets,
}

/// GET /presets
pub async fn list_presets(State(app): State<AppState>) -> Json<PresetsDump> {
    let state = app.state.lock().await;
    Json(state.presets().dump())
}

/// GET /preset/:name
pub async fn get_preset(
    State(app): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<PresetTargets>, HttpError> {
    let state = app.state.lock().await;
    state
        .presets()
        .get(&name)
        .map(|preset| Json(preset.serialize()))
        .map_err(|e| HttpError::from_servo_error(e, &name))
}

/// PUT /preset/:name
/// 201 for a new preset, 200 when an existing one was replaced.
pub async fn put_preset(
    State(app): State<AppState>,
    Path(name): Path<String>,
    ApiJson(request): ApiJson<PresetRequest>,
) -> Result<(StatusCode, Json<PresetTargets>), HttpError> {
    let mut state = app.state.lock().await;
    let (preset, created) = state
        .put_preset(&name, &request.servos)
        .map_err(|e| HttpError::from_servo_error(e, &name))?;

    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(preset.serialize())))
}

/// POST /preset/:name
/// Applies the preset; nothing moves if any member is no longer reachable.
pub async fn apply_preset(
    State(app): State<AppState>,
    Path(name): Path<String>,
) -> Result<StatusCode, HttpError> {
    let mut state = app.state.lock().await;
    state
        .apply_preset(&name)
        .map(|()| StatusCode::NO_CONTENT)
        .map_err(|e| HttpError::from_servo_error(e, &name))
}

/// DELETE /preset/:name
pub async fn delete_preset(
    State(app): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<String>, HttpError> {
    let mut state = app.state.lock().await;
    state
        .delete_preset(&name)
        .map(|()| Json(format!("Deleted: {}", name)))
        .map_err(|e| HttpError::from_servo_error(e, &name))
}
