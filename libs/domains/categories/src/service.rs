use std::sync::Arc;

use axum_helpers::Paginated;
use validator::Validate;

use crate::error::{CategoryError, CategoryResult};
use crate::models::{Category, CategoryFilter, CreateCategory, UpdateCategory};
use crate::repository::CategoryRepository;

#[derive(Clone)]
pub struct CategoryService<R: CategoryRepository> {
    repository: Arc<R>,
}

impl<R: CategoryRepository> CategoryService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub async fn create_category(&self, input: CreateCategory) -> CategoryResult<Category> {
        input
            .validate()
            .map_err(|e| CategoryError::Validation(e.to_string()))?;

        self.repository.create(input).await
    }

    pub async fn get_category(&self, id: i32) -> CategoryResult<Category> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(CategoryError::NotFound(id))
    }

    pub async fn list_categories(
        &self,
        filter: CategoryFilter,
    ) -> CategoryResult<Paginated<Category>> {
        filter
            .validate()
            .map_err(|e| CategoryError::Validation(e.to_string()))?;

        self.repository.list(filter).await
    }

    pub async fn update_category(
        &self,
        id: i32,
        input: UpdateCategory,
    ) -> CategoryResult<Category> {
        input
            .validate()
            .map_err(|e| CategoryError::Validation(e.to_string()))?;

        self.repository.update(id, input).await
    }

    pub async fn delete_category(&self, id: i32) -> CategoryResult<()> {
        if !self.repository.delete(id).await? {
            return Err(CategoryError::NotFound(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockCategoryRepository;

    #[tokio::test]
    async fn test_get_category_not_found() {
        let mut repo = MockCategoryRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let service = CategoryService::new(repo);
        assert!(matches!(
            service.get_category(3).await,
            Err(CategoryError::NotFound(3))
        ));
    }

    #[tokio::test]
    async fn test_delete_category_with_products_conflicts() {
        let mut repo = MockCategoryRepository::new();
        repo.expect_delete().returning(|_| {
            Err(CategoryError::HasDependents(
                "has associated products".into(),
            ))
        });

        let service = CategoryService::new(repo);
        assert!(matches!(
            service.delete_category(1).await,
            Err(CategoryError::HasDependents(_))
        ));
    }
}
