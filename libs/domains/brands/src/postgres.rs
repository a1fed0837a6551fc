use async_trait::async_trait;
use axum_helpers::{Paginated, pagination::offset_for};
use database::{ConstraintViolation, constraint_violation};
use sea_orm::ActiveValue::Set;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select,
};

use crate::entity;
use crate::error::{BrandError, BrandResult};
use crate::models::{Brand, BrandFilter, BrandSortBy, CreateBrand, UpdateBrand};
use crate::repository::BrandRepository;

pub struct PgBrandRepository {
    db: DatabaseConnection,
}

impl PgBrandRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn internal(e: DbErr) -> BrandError {
    BrandError::Internal(format!("Database error: {}", e))
}

fn sort_column(sort_by: BrandSortBy) -> entity::Column {
    match sort_by {
        BrandSortBy::Id => entity::Column::Id,
        BrandSortBy::Name => entity::Column::Name,
    }
}

fn build_list_query(filter: &BrandFilter) -> Select<entity::Entity> {
    use sea_orm::sea_query::extension::postgres::PgExpr;
    let mut query = entity::Entity::find();

    if let Some(name) = &filter.name {
        query = query.filter(
            Expr::col((entity::Entity, entity::Column::Name)).ilike(format!("%{}%", name)),
        );
    }

    query
}

#[async_trait]
impl BrandRepository for PgBrandRepository {
    async fn create(&self, input: CreateBrand) -> BrandResult<Brand> {
        let model = entity::ActiveModel {
            name: Set(input.name),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(internal)?;

        tracing::info!(brand_id = model.id, "Created brand");
        Ok(model.into())
    }

    async fn find_by_id(&self, id: i32) -> BrandResult<Option<Brand>> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(internal)?;

        Ok(model.map(Into::into))
    }

    async fn list(&self, filter: BrandFilter) -> BrandResult<Paginated<Brand>> {
        let query = build_list_query(&filter);

        let total = query.clone().count(&self.db).await.map_err(internal)?;

        let models = query
            .order_by(sort_column(filter.sort_by), filter.sort_order.into())
            .limit(filter.limit)
            .offset(offset_for(filter.page, filter.limit))
            .all(&self.db)
            .await
            .map_err(internal)?;

        let data = models.into_iter().map(Into::into).collect();
        Ok(Paginated::new(data, total, filter.page, filter.limit))
    }

    async fn update(&self, id: i32, input: UpdateBrand) -> BrandResult<Brand> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(internal)?
            .ok_or(BrandError::NotFound(id))?;

        let mut active: entity::ActiveModel = model.into();
        if let Some(name) = input.name {
            active.name = Set(name);
        }

        let updated = active.update(&self.db).await.map_err(internal)?;

        tracing::info!(brand_id = id, "Updated brand");
        Ok(updated.into())
    }

    async fn delete(&self, id: i32) -> BrandResult<bool> {
        let result = entity::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| match constraint_violation(&e) {
                Some(ConstraintViolation::ForeignKey(_)) => BrandError::HasDependents(
                    "Cannot delete brand: it has associated products. \
                     Delete the products first or move them to another brand."
                        .to_string(),
                ),
                _ => internal(e),
            })?;

        if result.rows_affected > 0 {
            tracing::info!(brand_id = id, "Deleted brand");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{DbBackend, QueryTrait};

    use super::*;

    #[test]
    fn test_list_query_applies_name_filter() {
        let filter = BrandFilter {
            name: Some("acme".to_string()),
            ..Default::default()
        };

        let sql = build_list_query(&filter).build(DbBackend::Postgres).to_string();
        assert!(sql.contains(r#"ILIKE '%acme%'"#), "sql was: {}", sql);
    }

    #[test]
    fn test_list_query_without_filters_has_no_where() {
        let sql = build_list_query(&BrandFilter::default())
            .build(DbBackend::Postgres)
            .to_string();
        assert!(!sql.contains("WHERE"), "sql was: {}", sql);
    }
}
