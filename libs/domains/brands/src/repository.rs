use async_trait::async_trait;
use axum_helpers::Paginated;

use crate::error::BrandResult;
use crate::models::{Brand, BrandFilter, CreateBrand, UpdateBrand};

/// Repository trait for brand persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BrandRepository: Send + Sync {
    async fn create(&self, input: CreateBrand) -> BrandResult<Brand>;

    async fn find_by_id(&self, id: i32) -> BrandResult<Option<Brand>>;

    async fn list(&self, filter: BrandFilter) -> BrandResult<Paginated<Brand>>;

    async fn update(&self, id: i32, input: UpdateBrand) -> BrandResult<Brand>;

    /// Delete the brand. Fails with `HasDependents` when products still
    /// reference it.
    async fn delete(&self, id: i32) -> BrandResult<bool>;
}
