//! Structured error bodies for the HTTP API

use crate::utils::error::{ErrorKind, ServoError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// One entry of the `errors` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiError {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiError {
    pub fn from_servo_error(err: &ServoError, item: &str) -> Self {
        Self {
            message: err.to_string(),
            item: Some(item.to_string()),
            error: Some(err.name().to_string()),
        }
    }
}

/// Position of a servo that did move during a partially successful batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedPosition {
    pub name: String,
    pub position: i32,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub errors: Vec<ApiError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub positions: Option<Vec<NamedPosition>>,
}

/// Error response: a status code plus an `{"errors": [...]}` body.
#[derive(Debug)]
pub struct HttpError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl HttpError {
    pub fn new(status: StatusCode, errors: Vec<ApiError>) -> Self {
        Self {
            status,
            body: ErrorBody {
                errors,
                positions: None,
            },
        }
    }

    /// Maps a core error for the resource `item`.
    ///
    /// The error's own subject wins over `item` when it has one, so a preset failing on one of
    /// its servos reports that servo.
    pub fn from_servo_error(err: ServoError, item: &str) -> Self {
        let status = status_for(err.kind());
        let item = err.item().unwrap_or(item).to_string();

        if status.is_server_error() {
            tracing::error!(status = %status, item = %item, "Request failed: {}", err);
        }

        Self::new(status, vec![ApiError::from_servo_error(&err, &item)])
    }
}

pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::OutOfRange => StatusCode::FORBIDDEN,
        ErrorKind::Invalid => StatusCode::BAD_REQUEST,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
