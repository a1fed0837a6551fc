use async_trait::async_trait;
use axum_helpers::Paginated;

use crate::error::UserResult;
use crate::models::{User, UserFilter, UserResponse};

/// Repository trait for user persistence.
///
/// Takes a pre-hashed credential; plain-text passwords never reach this
/// layer.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, email: String, password_hash: String, full_name: Option<String>, phone: Option<String>) -> UserResult<User>;

    async fn find_by_id(&self, id: i32) -> UserResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>>;

    async fn list(&self, filter: UserFilter) -> UserResult<Paginated<UserResponse>>;

    /// Apply only the given fields; `None` leaves a column untouched.
    async fn update(
        &self,
        id: i32,
        email: Option<String>,
        password_hash: Option<String>,
        full_name: Option<String>,
        phone: Option<String>,
    ) -> UserResult<User>;

    /// Fails with `HasDependents` when orders still reference the user.
    async fn delete(&self, id: i32) -> UserResult<bool>;
}
