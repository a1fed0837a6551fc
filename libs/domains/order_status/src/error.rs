use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrderStatusError {
    #[error("Order status not found: {0}")]
    NotFound(i32),

    #[error("Order status with identifier '{0}' already exists")]
    DuplicateIdentifier(String),

    #[error("Order status has dependent rows: {0}")]
    HasDependents(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type OrderStatusResult<T> = Result<T, OrderStatusError>;

impl From<OrderStatusError> for AppError {
    fn from(err: OrderStatusError) -> Self {
        match err {
            OrderStatusError::NotFound(id) => {
                AppError::NotFound(format!("Order status with id {} not found", id))
            }
            OrderStatusError::DuplicateIdentifier(identifier) => AppError::Conflict(format!(
                "Order status with identifier '{}' already exists",
                identifier
            )),
            OrderStatusError::HasDependents(msg) => AppError::Conflict(msg),
            OrderStatusError::Validation(msg) => AppError::BadRequest(msg),
            OrderStatusError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for OrderStatusError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
