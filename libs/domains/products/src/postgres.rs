use std::collections::HashMap;

use async_trait::async_trait;
use axum_helpers::{Paginated, pagination::offset_for};
use database::{ConstraintViolation, constraint_violation};
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select,
};

use crate::entity::product;
use crate::error::{ProductError, ProductResult};
use crate::images;
use crate::models::{
    BrandSummary, CategorySummary, CreateProduct, ImageSummary, Product, ProductFilter,
    ProductSortBy, UpdateProduct,
};
use crate::repository::ProductRepository;

pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn materialize_many(&self, models: Vec<product::Model>) -> ProductResult<Vec<Product>> {
        let product_ids: Vec<i32> = models.iter().map(|m| m.id).collect();
        let category_ids: Vec<i32> = models.iter().map(|m| m.category_id).collect();
        let brand_ids: Vec<i32> = models.iter().map(|m| m.brand_id).collect();

        let categories: HashMap<i32, CategorySummary> =
            domain_categories::entity::category::Entity::find()
                .filter(domain_categories::entity::category::Column::Id.is_in(category_ids))
                .all(&self.db)
                .await
                .map_err(internal)?
                .into_iter()
                .map(|c| {
                    (
                        c.id,
                        CategorySummary {
                            id: c.id,
                            name: c.name,
                            slug: c.slug,
                        },
                    )
                })
                .collect();

        let brands: HashMap<i32, BrandSummary> = domain_brands::entity::Entity::find()
            .filter(domain_brands::entity::Column::Id.is_in(brand_ids))
            .all(&self.db)
            .await
            .map_err(internal)?
            .into_iter()
            .map(|b| (b.id, BrandSummary { id: b.id, name: b.name }))
            .collect();

        let mut grouped_images: HashMap<i32, Vec<ImageSummary>> =
            images::find_for_products(&self.db, product_ids).await?;

        Ok(models
            .into_iter()
            .map(|model| Product {
                category: categories.get(&model.category_id).cloned(),
                brand: brands.get(&model.brand_id).cloned(),
                images: grouped_images.remove(&model.id).unwrap_or_default(),
                id: model.id,
                name: model.name,
                description: model.description,
                price: model.price,
                original_price: model.original_price,
                rating: model.rating,
                reviews: model.reviews,
                in_stock: model.in_stock,
                stock: model.stock,
                sku: model.sku,
                category_id: model.category_id,
                brand_id: model.brand_id,
                created_at: model.created_at.into(),
                updated_at: model.updated_at.into(),
            })
            .collect())
    }

    async fn materialize(&self, model: product::Model) -> ProductResult<Product> {
        let mut products = self.materialize_many(vec![model]).await?;
        products
            .pop()
            .ok_or_else(|| ProductError::Internal("Materialization yielded no product".into()))
    }
}

fn internal(e: DbErr) -> ProductError {
    ProductError::Internal(format!("Database error: {}", e))
}

/// Insert/update errors referencing a missing brand or category come back as
/// foreign-key violations; name the missing side from the constraint.
fn map_write_err(e: DbErr) -> ProductError {
    match constraint_violation(&e) {
        Some(ConstraintViolation::ForeignKey(msg)) => {
            let reference = if msg.contains("fk_products_category_id") {
                "category"
            } else if msg.contains("fk_products_brand_id") {
                "brand"
            } else {
                "referenced row"
            };
            ProductError::MissingReference(format!(
                "Referenced {} does not exist",
                reference
            ))
        }
        _ => internal(e),
    }
}

fn sort_column(sort_by: ProductSortBy) -> product::Column {
    match sort_by {
        ProductSortBy::Id => product::Column::Id,
        ProductSortBy::Name => product::Column::Name,
        ProductSortBy::Price => product::Column::Price,
        ProductSortBy::Rating => product::Column::Rating,
        ProductSortBy::CreatedAt => product::Column::CreatedAt,
        ProductSortBy::UpdatedAt => product::Column::UpdatedAt,
    }
}

fn build_list_query(filter: &ProductFilter) -> Select<product::Entity> {
    let mut query = product::Entity::find();

    if let Some(category_id) = filter.category_id {
        query = query.filter(product::Column::CategoryId.eq(category_id));
    }

    if let Some(brand_id) = filter.brand_id {
        query = query.filter(product::Column::BrandId.eq(brand_id));
    }

    if let Some(min_price) = filter.min_price {
        query = query.filter(product::Column::Price.gte(min_price));
    }

    if let Some(max_price) = filter.max_price {
        query = query.filter(product::Column::Price.lte(max_price));
    }

    if let Some(in_stock) = filter.in_stock {
        query = query.filter(product::Column::InStock.eq(in_stock));
    }

    query
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let mut active = product::ActiveModel {
            name: Set(input.name),
            description: Set(input.description),
            price: Set(input.price),
            original_price: Set(input.original_price),
            category_id: Set(input.category_id),
            brand_id: Set(input.brand_id),
            sku: Set(input.sku),
            ..Default::default()
        };
        if let Some(rating) = input.rating {
            active.rating = Set(rating);
        }
        if let Some(reviews) = input.reviews {
            active.reviews = Set(reviews);
        }
        if let Some(in_stock) = input.in_stock {
            active.in_stock = Set(in_stock);
        }
        if let Some(stock) = input.stock {
            active.stock = Set(stock);
        }

        let model = active.insert(&self.db).await.map_err(map_write_err)?;

        if !input.images.is_empty() {
            images::replace(&self.db, model.id, &input.images).await?;
        }

        tracing::info!(product_id = model.id, "Created product");
        self.materialize(model).await
    }

    async fn find_by_id(&self, id: i32) -> ProductResult<Option<Product>> {
        let model = product::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(internal)?;

        match model {
            Some(model) => Ok(Some(self.materialize(model).await?)),
            None => Ok(None),
        }
    }

    async fn list(&self, filter: ProductFilter) -> ProductResult<Paginated<Product>> {
        let query = build_list_query(&filter);

        let total = query.clone().count(&self.db).await.map_err(internal)?;

        let models = query
            .order_by(sort_column(filter.sort_by), filter.sort_order.into())
            .limit(filter.limit)
            .offset(offset_for(filter.page, filter.limit))
            .all(&self.db)
            .await
            .map_err(internal)?;

        let data = self.materialize_many(models).await?;
        Ok(Paginated::new(data, total, filter.page, filter.limit))
    }

    async fn update(&self, id: i32, input: UpdateProduct) -> ProductResult<Product> {
        let model = product::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(internal)?
            .ok_or(ProductError::NotFound(id))?;

        let mut active: product::ActiveModel = model.into();
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(description) = input.description {
            active.description = Set(Some(description));
        }
        if let Some(price) = input.price {
            active.price = Set(price);
        }
        if let Some(original_price) = input.original_price {
            active.original_price = Set(Some(original_price));
        }
        if let Some(rating) = input.rating {
            active.rating = Set(rating);
        }
        if let Some(reviews) = input.reviews {
            active.reviews = Set(reviews);
        }
        if let Some(in_stock) = input.in_stock {
            active.in_stock = Set(in_stock);
        }
        if let Some(stock) = input.stock {
            active.stock = Set(stock);
        }
        if let Some(sku) = input.sku {
            active.sku = Set(Some(sku));
        }
        if let Some(category_id) = input.category_id {
            active.category_id = Set(category_id);
        }
        if let Some(brand_id) = input.brand_id {
            active.brand_id = Set(brand_id);
        }
        active.updated_at = Set(chrono::Utc::now().into());

        let updated = active.update(&self.db).await.map_err(map_write_err)?;

        if let Some(new_images) = &input.images {
            if !new_images.is_empty() {
                images::replace(&self.db, id, new_images).await?;
            }
        }

        tracing::info!(product_id = id, "Updated product");
        self.materialize(updated).await
    }

    async fn delete(&self, id: i32) -> ProductResult<bool> {
        let result = product::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| match constraint_violation(&e) {
                Some(ConstraintViolation::ForeignKey(_)) => ProductError::HasDependents(
                    "Cannot delete product: it appears in existing orders.".to_string(),
                ),
                _ => internal(e),
            })?;

        if result.rows_affected > 0 {
            tracing::info!(product_id = id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use sea_orm::{DbBackend, QueryTrait};

    use super::*;

    #[test]
    fn test_list_query_applies_price_range() {
        let filter = ProductFilter {
            min_price: Some(Decimal::new(1000, 2)),
            max_price: Some(Decimal::new(5000, 2)),
            ..Default::default()
        };

        let sql = build_list_query(&filter).build(DbBackend::Postgres).to_string();
        assert!(sql.contains(r#""price" >= 10.00"#) || sql.contains(r#""price" >= 10"#), "sql was: {}", sql);
        assert!(sql.contains(r#""price" <= 50.00"#) || sql.contains(r#""price" <= 50"#), "sql was: {}", sql);
    }

    #[test]
    fn test_list_query_applies_equality_filters() {
        let filter = ProductFilter {
            category_id: Some(3),
            brand_id: Some(7),
            in_stock: Some(true),
            ..Default::default()
        };

        let sql = build_list_query(&filter).build(DbBackend::Postgres).to_string();
        assert!(sql.contains(r#""category_id" = 3"#), "sql was: {}", sql);
        assert!(sql.contains(r#""brand_id" = 7"#), "sql was: {}", sql);
        assert!(sql.contains(r#""in_stock" = TRUE"#), "sql was: {}", sql);
    }

    #[test]
    fn test_fk_violations_name_the_missing_reference() {
        let err = map_write_err(DbErr::Custom("other".into()));
        assert!(matches!(err, ProductError::Internal(_)));
    }
}
