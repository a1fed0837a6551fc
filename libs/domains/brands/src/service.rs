use std::sync::Arc;

use axum_helpers::Paginated;
use validator::Validate;

use crate::error::{BrandError, BrandResult};
use crate::models::{Brand, BrandFilter, CreateBrand, UpdateBrand};
use crate::repository::BrandRepository;

/// Service layer for brand business logic
#[derive(Clone)]
pub struct BrandService<R: BrandRepository> {
    repository: Arc<R>,
}

impl<R: BrandRepository> BrandService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub async fn create_brand(&self, input: CreateBrand) -> BrandResult<Brand> {
        input
            .validate()
            .map_err(|e| BrandError::Validation(e.to_string()))?;

        self.repository.create(input).await
    }

    pub async fn get_brand(&self, id: i32) -> BrandResult<Brand> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(BrandError::NotFound(id))
    }

    pub async fn list_brands(&self, filter: BrandFilter) -> BrandResult<Paginated<Brand>> {
        filter
            .validate()
            .map_err(|e| BrandError::Validation(e.to_string()))?;

        self.repository.list(filter).await
    }

    pub async fn update_brand(&self, id: i32, input: UpdateBrand) -> BrandResult<Brand> {
        input
            .validate()
            .map_err(|e| BrandError::Validation(e.to_string()))?;

        self.repository.update(id, input).await
    }

    pub async fn delete_brand(&self, id: i32) -> BrandResult<()> {
        if !self.repository.delete(id).await? {
            return Err(BrandError::NotFound(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockBrandRepository;

    #[tokio::test]
    async fn test_get_brand_not_found() {
        let mut repo = MockBrandRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let service = BrandService::new(repo);
        let result = service.get_brand(99).await;

        assert!(matches!(result, Err(BrandError::NotFound(99))));
    }

    #[tokio::test]
    async fn test_delete_brand_missing_is_not_found() {
        let mut repo = MockBrandRepository::new();
        repo.expect_delete().returning(|_| Ok(false));

        let service = BrandService::new(repo);
        let result = service.delete_brand(7).await;

        assert!(matches!(result, Err(BrandError::NotFound(7))));
    }

    #[tokio::test]
    async fn test_delete_conflict_propagates() {
        let mut repo = MockBrandRepository::new();
        repo.expect_delete()
            .returning(|_| Err(BrandError::HasDependents("has associated products".into())));

        let service = BrandService::new(repo);
        let result = service.delete_brand(1).await;

        assert!(matches!(result, Err(BrandError::HasDependents(_))));
    }

    #[tokio::test]
    async fn test_create_rejects_empty_name() {
        let repo = MockBrandRepository::new();
        let service = BrandService::new(repo);

        let result = service
            .create_brand(CreateBrand {
                name: String::new(),
            })
            .await;

        assert!(matches!(result, Err(BrandError::Validation(_))));
    }
}
