//! Integer path parameter extractor with validation.

use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
    response::{IntoResponse, Response},
};

use crate::errors::AppError;

/// Extractor for positive integer path ids.
///
/// All entities in this system use serial integer primary keys; this parses
/// the path parameter and rejects non-numeric or non-positive values with a
/// proper error response instead of axum's default rejection.
///
/// # Example
/// ```ignore
/// use axum_helpers::IdPath;
///
/// async fn get_brand(IdPath(id): IdPath) -> String {
///     format!("Brand ID: {}", id)
/// }
/// ```
pub struct IdPath(pub i32);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| e.into_response())?;

        match raw.parse::<i32>() {
            Ok(id) if id >= 1 => Ok(IdPath(id)),
            _ => Err(AppError::BadRequest(format!("Invalid id: {}", raw)).into_response()),
        }
    }
}
