//! Absolute and relative movement endpoints

use crate::domain::model::{BatchOutcome, MoveFailure, ServoSnapshot};
use crate::web::error::{ApiError, ErrorBody, HttpError, NamedPosition};
use crate::web::extract::ApiJson;
use crate::web::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Deserialize)]
pub struct AbsoluteRequest {
    pub position: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BatchRequest {
    pub position: BTreeMap<String, i32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchResponse {
    pub positions: BTreeMap<String, i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RelativeRequest {
    pub movement: i32,
}

/// GET /absolute
pub async fn all_positions(State(app): State<AppState>) -> Json<BTreeMap<String, i32>> {
    let state = app.state.lock().await;
    Json(state.servos().positions())
}

/// GET /absolute/:name
pub async fn get_position(
    State(app): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<i32>, HttpError> {
    let state = app.state.lock().await;
    state
        .servos()
        .get(&name)
        .map(|servo| Json(servo.position()))
        .map_err(|e| HttpError::from_servo_error(e, &name))
}

/// POST /absolute/:name
pub async fn move_absolute(
    State(app): State<AppState>,
    Path(name): Path<String>,
    ApiJson(request): ApiJson<AbsoluteRequest>,
) -> Result<Json<ServoSnapshot>, HttpError> {
    let mut state = app.state.lock().await;
    state
        .move_absolute(&name, request.position)
        .map(|servo| Json(servo.serialize()))
        .map_err(|e| HttpError::from_servo_error(e, &name))
}

/// POST /absolute
/// 200 when every servo moved, 207 when only some did, 400 when none did.
pub async fn move_batch(
    State(app): State<AppState>,
    ApiJson(request): ApiJson<BatchRequest>,
) -> Result<Response, HttpError> {
    let mut state = app.state.lock().await;
    let outcome = state
        .move_batch(&request.position)
        .map_err(|e| HttpError::from_servo_error(e, "absolute"))?;

    let response = match outcome {
        BatchOutcome::Complete { positions } => {
            (StatusCode::OK, Json(BatchResponse { positions })).into_response()
        }
        BatchOutcome::Partial {
            positions,
            failures,
        } => {
            let body = ErrorBody {
                errors: api_errors(&failures),
                positions: Some(
                    positions
                        .into_iter()
                        .map(|(name, position)| NamedPosition { name, position })
                        .collect(),
                ),
            };
            (StatusCode::MULTI_STATUS, Json(body)).into_response()
        }
        BatchOutcome::Failed { failures } => {
            HttpError::new(StatusCode::BAD_REQUEST, api_errors(&failures)).into_response()
        }
    };
    Ok(response)
}

/// POST /relative/:name
/// Never rejected for range; the result is clamped to the servo limits.
pub async fn move_relative(
    State(app): State<AppState>,
    Path(name): Path<String>,
    ApiJson(request): ApiJson<RelativeRequest>,
) -> Result<Json<ServoSnapshot>, HttpError> {
    let mut state = app.state.lock().await;
    state
        .move_relative(&name, request.movement)
        .map(|servo| Json(servo.serialize()))
        .map_err(|e| HttpError::from_servo_error(e, &name))
}

fn api_errors(failures: &[MoveFailure]) -> Vec<ApiError> {
    failures
        .iter()
        .map(|failure| ApiError::from_servo_error(&failure.error, &failure.item))
        .collect()
}
