//! Servo configuration endpoints

use crate::domain::model::{Limits, ServoSnapshot, ServoSpec, ServoUpdate, ServosDump};
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
pub struct ServoRequest {
    pub limit_min: i32,
    pub limit_max: i32,
    pub channel: u16,
    #[serde(default)]
    pub position: Option<i32>,
}

impl From<ServoRequest> for ServoSpec {
    fn from(request: ServoRequest) -> Self {
        Self {
            limits: Limits::new(request.limit_min, request.limit_max),
            channel: request.channel,
            position: request.position,
        }
    }
}

/// GET /servos
pub async fn list_servos(State(app): State<AppState>) -> Json<ServosDump> {
    let state = app.state.lock().await;
    Json(state.servos().dump())
}

/// GET /servo/:name
pub async fn get_servo(
    State(app): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ServoSnapshot>, HttpError> {
    let state = app.state.lock().await;
    state
        .servos()
        .get(&name)
        .map(|servo| Json(servo.serialize()))
        .map_err(|e| HttpError::from_servo_error(e, &name))
}

/// PUT /servo/:name
/// Creates the servo or replaces it entirely.
pub async fn put_servo(
    State(app): State<AppState>,
    Path(name): Path<String>,
    ApiJson(request): ApiJson<ServoRequest>,
) -> Result<(StatusCode, Json<ServoSnapshot>), HttpError> {
    let mut state = app.state.lock().await;
    state
        .put_servo(&name, request.into())
        .map(|servo| (StatusCode::CREATED, Json(servo.serialize())))
        .map_err(|e| HttpError::from_servo_error(e, &name))
}

/// PATCH /servo/:name
/// Partial update of limits and channel; the position is left alone.
pub async fn patch_servo(
    State(app): State<AppState>,
    Path(name): Path<String>,
    ApiJson(update): ApiJson<ServoUpdate>,
) -> Result<Json<ServoSnapshot>, HttpError> {
    let mut state = app.state.lock().await;
    state
        .update_servo(&name, &update)
        .map(|servo| Json(servo.serialize()))
        .map_err(|e| HttpError::from_servo_error(e, &name))
}

/// DELETE /servo/:name
pub async fn delete_servo(
    State(app): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<String>, HttpError> {
    let mut state = app.state.lock().await;
    state
        .delete_servo(&name)
        .map(|()| Json(format!("Deleted: {}", name)))
        .map_err(|e| HttpError::from_servo_error(e, &name))
}
