//! HTTP transport
//!
//! Thin axum layer over [`State`]: parses requests, runs one operation under the state lock,
//! and maps the result or error to a JSON response.

pub mod error;
pub mod extract;
mod position_routes;
mod preset_routes;
mod servo_routes;

use crate::core::state::State;
use axum::{
    extract::State as AxumState,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;

/// Shared handle given to every handler. The mutex is held for the whole operation.
#[derive(Clone)]
pub struct AppState {
    pub state: Arc<Mutex<State>>,
}

impl AppState {
    pub fn new(state: State) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }
}

pub fn create_router(app: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/servos", get(servo_routes::list_servos))
        .route(
            "/servo/:name",
            get(servo_routes::get_servo)
                .put(servo_routes::put_servo)
                .patch(servo_routes::patch_servo)
                .delete(servo_routes::delete_servo),
        )
        .route(
            "/absolute",
            get(position_routes::all_positions).post(position_routes::move_batch),
        )
        .route(
            "/absolute/:name",
            get(position_routes::get_position).post(position_routes::move_absolute),
        )
        .route("/relative/:name", post(position_routes::move_relative))
        .route("/presets", get(preset_routes::list_presets))
        .route(
            "/preset/:name",
            get(preset_routes::get_preset)
                .put(preset_routes::put_preset)
                .post(preset_routes::apply_preset)
                .delete(preset_routes::delete_preset),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(app)
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub servos: usize,
    pub presets: usize,
}

/// Health check endpoint
pub async fn health_check(AxumState(app): AxumState<AppState>) -> Json<HealthResponse> {
    let state = app.state.lock().await;
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        servos: state.servos().len(),
        presets: state.presets().len(),
    })
}
