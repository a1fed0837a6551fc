use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BrandError {
    #[error("Brand not found: {0}")]
    NotFound(i32),

    #[error("Brand has dependent rows: {0}")]
    HasDependents(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type BrandResult<T> = Result<T, BrandError>;

impl From<BrandError> for AppError {
    fn from(err: BrandError) -> Self {
        match err {
            BrandError::NotFound(id) => AppError::NotFound(format!("Brand with id {} not found", id)),
            BrandError::HasDependents(msg) => AppError::Conflict(msg),
            BrandError::Validation(msg) => AppError::BadRequest(msg),
            BrandError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for BrandError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
