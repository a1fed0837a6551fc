use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use axum_helpers::pagination::{default_limit, default_page};

pub(crate) fn validate_positive_decimal(value: &Decimal) -> Result<(), ValidationError> {
    if *value <= Decimal::ZERO {
        return Err(ValidationError::new("positive"));
    }
    Ok(())
}

/// A catalog product with its brand/category summaries and image set
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    /// Current selling price
    pub price: Decimal,
    /// Pre-discount price, when on offer
    pub original_price: Option<Decimal>,
    pub rating: Decimal,
    pub reviews: i32,
    pub in_stock: bool,
    pub stock: i32,
    pub sku: Option<String>,
    pub category_id: i32,
    pub brand_id: i32,
    pub category: Option<CategorySummary>,
    pub brand: Option<BrandSummary>,
    pub images: Vec<ImageSummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategorySummary {
    pub id: i32,
    pub name: String,
    pub slug: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BrandSummary {
    pub id: i32,
    pub name: String,
}

/// One persisted image variant, reported with the bare size label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ImageSummary {
    pub size: String,
    pub url: String,
}

/// One image variant supplied by a client
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ImageInput {
    #[validate(length(min = 1, max = 50))]
    pub size: String,
    #[validate(length(min = 1, max = 500))]
    pub url: String,
    #[validate(length(min = 1, max = 255))]
    pub public_id: String,
}

/// DTO for creating a product
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub description: Option<String>,
    #[validate(custom(function = "validate_positive_decimal"))]
    pub price: Decimal,
    #[validate(custom(function = "validate_positive_decimal"))]
    pub original_price: Option<Decimal>,
    pub rating: Option<Decimal>,
    #[validate(range(min = 0))]
    pub reviews: Option<i32>,
    pub in_stock: Option<bool>,
    #[validate(range(min = 0))]
    pub stock: Option<i32>,
    #[validate(length(min = 1, max = 100))]
    pub sku: Option<String>,
    #[validate(range(min = 1))]
    pub category_id: i32,
    #[validate(range(min = 1))]
    pub brand_id: i32,
    /// Replaces the whole image set when present and non-empty
    #[serde(default)]
    #[validate(nested)]
    pub images: Vec<ImageInput>,
}

/// DTO for partially updating a product
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(custom(function = "validate_positive_decimal"))]
    pub price: Option<Decimal>,
    #[validate(custom(function = "validate_positive_decimal"))]
    pub original_price: Option<Decimal>,
    pub rating: Option<Decimal>,
    #[validate(range(min = 0))]
    pub reviews: Option<i32>,
    pub in_stock: Option<bool>,
    #[validate(range(min = 0))]
    pub stock: Option<i32>,
    #[validate(length(min = 1, max = 100))]
    pub sku: Option<String>,
    #[validate(range(min = 1))]
    pub category_id: Option<i32>,
    #[validate(range(min = 1))]
    pub brand_id: Option<i32>,
    /// Replaces the whole image set when present and non-empty
    #[validate(nested)]
    pub images: Option<Vec<ImageInput>>,
}

/// Sort keys accepted when listing products
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum ProductSortBy {
    Id,
    Name,
    Price,
    Rating,
    #[default]
    CreatedAt,
    UpdatedAt,
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl From<SortOrder> for sea_orm::Order {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::Asc => sea_orm::Order::Asc,
            SortOrder::Desc => sea_orm::Order::Desc,
        }
    }
}

/// Query filters for listing products
#[derive(Debug, Clone, Deserialize, Validate, ToSchema, IntoParams)]
pub struct ProductFilter {
    pub category_id: Option<i32>,
    pub brand_id: Option<i32>,
    /// Inclusive lower bound on price
    pub min_price: Option<Decimal>,
    /// Inclusive upper bound on price
    pub max_price: Option<Decimal>,
    pub in_stock: Option<bool>,
    #[serde(default)]
    pub sort_by: ProductSortBy,
    #[serde(default)]
    pub sort_order: SortOrder,
    #[serde(default = "default_page")]
    #[validate(range(min = 1))]
    pub page: u64,
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100))]
    pub limit: u64,
}

impl Default for ProductFilter {
    fn default() -> Self {
        Self {
            category_id: None,
            brand_id: None,
            min_price: None,
            max_price: None,
            in_stock: None,
            sort_by: ProductSortBy::default(),
            sort_order: SortOrder::default(),
            page: default_page(),
            limit: default_limit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_product_rejects_non_positive_price() {
        let input = CreateProduct {
            name: "Widget".into(),
            description: None,
            price: Decimal::ZERO,
            original_price: None,
            rating: None,
            reviews: None,
            in_stock: None,
            stock: None,
            sku: None,
            category_id: 1,
            brand_id: 1,
            images: vec![],
        };

        assert!(input.validate().is_err());
    }

    #[test]
    fn test_sort_keys_use_the_api_spelling() {
        // timestamps are camelCase on the wire
        let key: ProductSortBy = serde_json::from_str(r#""createdAt""#).unwrap();
        assert_eq!(key, ProductSortBy::CreatedAt);
    }
}
