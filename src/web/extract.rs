//! JSON body extractor whose rejections use the API error body

use crate::web::error::{ApiError, HttpError};
use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    Json,
};

/// Like `axum::Json`, but a body that is missing, malformed or of the wrong shape becomes a
/// 400 with an `{"errors": [...]}` body.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

impl From<JsonRejection> for HttpError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(status = %rejection.status(), "Rejected request body: {}", rejection.body_text());
        HttpError::new(
            StatusCode::BAD_REQUEST,
            vec![ApiError {
                message: rejection.body_text(),
                item: None,
                error: Some("InvalidRequestBody".to_string()),
            }],
        )
    }
}
