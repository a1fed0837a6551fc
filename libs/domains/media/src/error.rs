use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("Invalid file: {0}")]
    InvalidFile(String),

    #[error("Media service error: {0}")]
    Upstream(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type MediaResult<T> = Result<T, MediaError>;

impl From<MediaError> for AppError {
    fn from(err: MediaError) -> Self {
        match err {
            MediaError::InvalidFile(msg) => AppError::BadRequest(msg),
            // The upstream service failing is not the client's fault; the
            // detail is logged, the client gets the generic message.
            MediaError::Upstream(msg) => AppError::InternalServerError(msg),
            MediaError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for MediaError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
