use std::sync::Arc;

use axum_helpers::Paginated;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, ProductFilter, UpdateProduct};
use crate::repository::ProductRepository;

#[derive(Clone)]
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        self.repository.create(input).await
    }

    pub async fn get_product(&self, id: i32) -> ProductResult<Product> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    pub async fn list_products(&self, filter: ProductFilter) -> ProductResult<Paginated<Product>> {
        filter
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        self.repository.list(filter).await
    }

    pub async fn update_product(&self, id: i32, input: UpdateProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        self.repository.update(id, input).await
    }

    pub async fn delete_product(&self, id: i32) -> ProductResult<()> {
        if !self.repository.delete(id).await? {
            return Err(ProductError::NotFound(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::repository::MockProductRepository;

    fn valid_input() -> CreateProduct {
        CreateProduct {
            name: "Widget".into(),
            description: None,
            price: Decimal::new(9999, 2),
            original_price: None,
            rating: None,
            reviews: None,
            in_stock: None,
            stock: None,
            sku: Some("W-1".into()),
            category_id: 1,
            brand_id: 1,
            images: vec![],
        }
    }

    #[tokio::test]
    async fn test_create_rejects_non_positive_price() {
        let repo = MockProductRepository::new();
        let service = ProductService::new(repo);

        let result = service
            .create_product(CreateProduct {
                price: Decimal::ZERO,
                ..valid_input()
            })
            .await;

        assert!(matches!(result, Err(ProductError::Validation(_))));
    }

    #[tokio::test]
    async fn test_missing_brand_or_category_propagates() {
        let mut repo = MockProductRepository::new();
        repo.expect_create().returning(|_| {
            Err(ProductError::MissingReference(
                "Referenced brand does not exist".into(),
            ))
        });

        let service = ProductService::new(repo);
        let result = service.create_product(valid_input()).await;

        assert!(matches!(result, Err(ProductError::MissingReference(_))));
    }

    #[tokio::test]
    async fn test_delete_product_in_orders_conflicts() {
        let mut repo = MockProductRepository::new();
        repo.expect_delete().returning(|_| {
            Err(ProductError::HasDependents(
                "it appears in existing orders".into(),
            ))
        });

        let service = ProductService::new(repo);
        assert!(matches!(
            service.delete_product(5).await,
            Err(ProductError::HasDependents(_))
        ));
    }
}
