pub mod error;
pub mod retry;

pub use error::{ConstraintViolation, DatabaseError, DatabaseResult, constraint_violation};
pub use retry::{RetryConfig, retry, retry_with_backoff};
