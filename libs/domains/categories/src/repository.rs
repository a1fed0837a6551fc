use async_trait::async_trait;
use axum_helpers::Paginated;

use crate::error::CategoryResult;
use crate::models::{Category, CategoryFilter, CreateCategory, UpdateCategory};

/// Repository trait for category persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn create(&self, input: CreateCategory) -> CategoryResult<Category>;

    async fn find_by_id(&self, id: i32) -> CategoryResult<Option<Category>>;

    async fn list(&self, filter: CategoryFilter) -> CategoryResult<Paginated<Category>>;

    async fn update(&self, id: i32, input: UpdateCategory) -> CategoryResult<Category>;

    /// Fails with `HasDependents` when products still reference the category.
    async fn delete(&self, id: i32) -> CategoryResult<bool>;
}
