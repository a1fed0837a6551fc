use async_trait::async_trait;
use axum_helpers::Paginated;

use crate::error::ProductResult;
use crate::models::{CreateProduct, Product, ProductFilter, UpdateProduct};

/// Repository trait for product persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Fails with `MissingReference` when the brand or category id does not
    /// exist.
    async fn create(&self, input: CreateProduct) -> ProductResult<Product>;

    async fn find_by_id(&self, id: i32) -> ProductResult<Option<Product>>;

    async fn list(&self, filter: ProductFilter) -> ProductResult<Paginated<Product>>;

    async fn update(&self, id: i32, input: UpdateProduct) -> ProductResult<Product>;

    /// Fails with `HasDependents` when order line items still reference the
    /// product.
    async fn delete(&self, id: i32) -> ProductResult<bool>;
}
