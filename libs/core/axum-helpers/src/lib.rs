//! Shared axum plumbing: the application error type, validated extractors,
//! the pagination envelope, and server bootstrap with OpenAPI docs.

pub mod errors;
pub mod extractors;
pub mod pagination;
pub mod server;

pub use errors::{AppError, ErrorResponse};
pub use extractors::{IdPath, ValidatedJson};
pub use pagination::{DEFAULT_LIMIT, DEFAULT_PAGE, MAX_LIMIT, Paginated};
pub use server::{create_app, create_production_app, create_router, health_router};
