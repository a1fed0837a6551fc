use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(i32),

    /// The declared order total disagrees with the line-item sum beyond the
    /// allowed tolerance. Carries both values for the client message.
    #[error("The computed total ({computed}) does not match the provided total ({declared})")]
    TotalMismatch { computed: Decimal, declared: Decimal },

    /// A referenced user, status, payment method or product id does not exist
    #[error("Missing reference: {0}")]
    MissingReference(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type OrderResult<T> = Result<T, OrderError>;

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::NotFound(id) => {
                AppError::NotFound(format!("Order with id {} not found", id))
            }
            OrderError::TotalMismatch { .. } => AppError::BadRequest(err.to_string()),
            OrderError::MissingReference(msg) => AppError::NotFound(msg),
            OrderError::Validation(msg) => AppError::BadRequest(msg),
            OrderError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for OrderError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
