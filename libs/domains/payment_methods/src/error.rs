use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PaymentMethodError {
    #[error("Payment method not found: {0}")]
    NotFound(i32),

    #[error("Payment method with identifier '{0}' already exists")]
    DuplicateIdentifier(String),

    #[error("Payment method has dependent rows: {0}")]
    HasDependents(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type PaymentMethodResult<T> = Result<T, PaymentMethodError>;

impl From<PaymentMethodError> for AppError {
    fn from(err: PaymentMethodError) -> Self {
        match err {
            PaymentMethodError::NotFound(id) => {
                AppError::NotFound(format!("Payment method with id {} not found", id))
            }
            PaymentMethodError::DuplicateIdentifier(identifier) => AppError::Conflict(format!(
                "Payment method with identifier '{}' already exists",
                identifier
            )),
            PaymentMethodError::HasDependents(msg) => AppError::Conflict(msg),
            PaymentMethodError::Validation(msg) => AppError::BadRequest(msg),
            PaymentMethodError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for PaymentMethodError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
