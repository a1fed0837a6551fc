use async_trait::async_trait;
use axum_helpers::{Paginated, pagination::offset_for};
use database::{ConstraintViolation, constraint_violation};
use sea_orm::ActiveValue::Set;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select,
};

use crate::entity::category;
use crate::error::{CategoryError, CategoryResult};
use crate::images;
use crate::models::{Category, CategoryFilter, CategorySortBy, CreateCategory, UpdateCategory};
use crate::repository::CategoryRepository;

pub struct PgCategoryRepository {
    db: DatabaseConnection,
}

impl PgCategoryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn materialize(&self, model: category::Model) -> CategoryResult<Category> {
        let category_images = images::find_for_category(&self.db, model.id).await?;

        Ok(Category {
            id: model.id,
            name: model.name,
            slug: model.slug,
            image: model.image,
            images: category_images,
        })
    }
}

fn internal(e: DbErr) -> CategoryError {
    CategoryError::Internal(format!("Database error: {}", e))
}

fn sort_column(sort_by: CategorySortBy) -> category::Column {
    match sort_by {
        CategorySortBy::Id => category::Column::Id,
        CategorySortBy::Name => category::Column::Name,
        CategorySortBy::Slug => category::Column::Slug,
    }
}

fn build_list_query(filter: &CategoryFilter) -> Select<category::Entity> {
    use sea_orm::sea_query::extension::postgres::PgExpr;
    let mut query = category::Entity::find();

    if let Some(name) = &filter.name {
        query = query.filter(
            Expr::col((category::Entity, category::Column::Name)).ilike(format!("%{}%", name)),
        );
    }

    if let Some(slug) = &filter.slug {
        query = query.filter(
            Expr::col((category::Entity, category::Column::Slug)).ilike(format!("%{}%", slug)),
        );
    }

    query
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn create(&self, input: CreateCategory) -> CategoryResult<Category> {
        let model = category::ActiveModel {
            name: Set(input.name),
            slug: Set(input.slug),
            image: Set(input.image),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(internal)?;

        if !input.images.is_empty() {
            images::replace(&self.db, model.id, &input.images).await?;
        }

        tracing::info!(category_id = model.id, "Created category");
        self.materialize(model).await
    }

    async fn find_by_id(&self, id: i32) -> CategoryResult<Option<Category>> {
        let model = category::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(internal)?;

        match model {
            Some(model) => Ok(Some(self.materialize(model).await?)),
            None => Ok(None),
        }
    }

    async fn list(&self, filter: CategoryFilter) -> CategoryResult<Paginated<Category>> {
        let query = build_list_query(&filter);

        let total = query.clone().count(&self.db).await.map_err(internal)?;

        let models = query
            .order_by(sort_column(filter.sort_by), filter.sort_order.into())
            .limit(filter.limit)
            .offset(offset_for(filter.page, filter.limit))
            .all(&self.db)
            .await
            .map_err(internal)?;

        let ids: Vec<i32> = models.iter().map(|m| m.id).collect();
        let mut grouped_images = images::find_for_categories(&self.db, ids).await?;

        let data = models
            .into_iter()
            .map(|model| Category {
                images: grouped_images.remove(&model.id).unwrap_or_default(),
                id: model.id,
                name: model.name,
                slug: model.slug,
                image: model.image,
            })
            .collect();

        Ok(Paginated::new(data, total, filter.page, filter.limit))
    }

    async fn update(&self, id: i32, input: UpdateCategory) -> CategoryResult<Category> {
        let model = category::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(internal)?
            .ok_or(CategoryError::NotFound(id))?;

        let mut active: category::ActiveModel = model.into();
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(slug) = input.slug {
            active.slug = Set(Some(slug));
        }
        if let Some(image) = input.image {
            active.image = Set(Some(image));
        }

        let updated = active.update(&self.db).await.map_err(internal)?;

        if let Some(new_images) = &input.images {
            if !new_images.is_empty() {
                images::replace(&self.db, id, new_images).await?;
            }
        }

        tracing::info!(category_id = id, "Updated category");
        self.materialize(updated).await
    }

    async fn delete(&self, id: i32) -> CategoryResult<bool> {
        let result = category::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| match constraint_violation(&e) {
                Some(ConstraintViolation::ForeignKey(_)) => CategoryError::HasDependents(
                    "Cannot delete category: it has associated products. \
                     Delete the products first or move them to another category."
                        .to_string(),
                ),
                _ => internal(e),
            })?;

        if result.rows_affected > 0 {
            tracing::info!(category_id = id, "Deleted category");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
