use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use axum_helpers::pagination::{default_limit, default_page};

fn validate_positive_decimal(value: &Decimal) -> Result<(), ValidationError> {
    if *value <= Decimal::ZERO {
        return Err(ValidationError::new("positive"));
    }
    Ok(())
}

/// An order header, without its associations
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: i32,
    pub user_id: i32,
    pub status_id: i32,
    pub total: Decimal,
    pub date: DateTime<Utc>,
    pub payment_method_id: i32,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<crate::entity::order::Model> for Order {
    fn from(model: crate::entity::order::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            status_id: model.status_id,
            total: model.total,
            date: model.date.into(),
            payment_method_id: model.payment_method_id,
            address: model.address,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

/// A materialized order: the header with its user, status, payment method
/// and line items (each with a product summary) attached
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderDetails {
    pub id: i32,
    pub user_id: i32,
    pub status_id: i32,
    pub total: Decimal,
    pub date: DateTime<Utc>,
    pub payment_method_id: i32,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user: Option<UserSummary>,
    pub status: Option<StatusSummary>,
    pub payment_method: Option<PaymentMethodSummary>,
    pub products: Vec<LineItemDetails>,
}

/// A line item with its product summary
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LineItemDetails {
    pub id: i32,
    pub product_id: i32,
    pub quantity: i32,
    /// Unit price captured at order time
    pub price: Decimal,
    /// Always price * quantity
    pub sub_total: Decimal,
    pub product: Option<ProductSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserSummary {
    pub id: i32,
    pub email: String,
    pub full_name: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatusSummary {
    pub id: i32,
    pub identifier: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaymentMethodSummary {
    pub id: i32,
    pub identifier: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductSummary {
    pub id: i32,
    pub name: String,
    pub sku: Option<String>,
    /// The product's current price, not the captured order price
    pub price: Decimal,
}

/// One line item in a create/update request
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct CreateOrderLineItem {
    #[validate(range(min = 1))]
    pub product_id: i32,
    #[validate(range(min = 1))]
    pub quantity: i32,
    /// Unit price at order time
    #[validate(custom(function = "validate_positive_decimal"))]
    pub price: Decimal,
}

/// DTO for creating an order with its full line-item set
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateOrder {
    #[validate(range(min = 1))]
    pub user_id: i32,
    #[validate(range(min = 1))]
    pub status_id: i32,
    /// Declared total; must agree with the line-item sum
    #[validate(custom(function = "validate_positive_decimal"))]
    pub total: Decimal,
    #[validate(range(min = 1))]
    pub payment_method_id: i32,
    pub address: Option<String>,
    #[validate(
        length(min = 1, message = "the order must have at least one product"),
        nested
    )]
    pub products: Vec<CreateOrderLineItem>,
}

/// DTO for partially updating an order.
///
/// Absent fields leave the header untouched. A present, non-empty `products`
/// list replaces the entire line-item set; when it is present and `total` is
/// absent, the computed line-item sum becomes the authoritative total.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateOrder {
    #[validate(range(min = 1))]
    pub user_id: Option<i32>,
    #[validate(range(min = 1))]
    pub status_id: Option<i32>,
    #[validate(custom(function = "validate_positive_decimal"))]
    pub total: Option<Decimal>,
    #[validate(range(min = 1))]
    pub payment_method_id: Option<i32>,
    pub address: Option<String>,
    #[validate(nested)]
    pub products: Option<Vec<CreateOrderLineItem>>,
}

/// Confirmation returned by the delete endpoint
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteConfirmation {
    pub message: String,
}

/// Sort keys accepted when listing orders.
///
/// The spelling matches the public API: entity columns are snake_case, the
/// timestamp pair is camelCase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum OrderSortBy {
    Id,
    Total,
    #[default]
    Date,
    UserId,
    StatusId,
    #[serde(rename = "createdAt")]
    CreatedAt,
    #[serde(rename = "updatedAt")]
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

/// Query filters for listing orders
#[derive(Debug, Clone, Deserialize, Validate, ToSchema, IntoParams)]
pub struct OrderFilter {
    pub user_id: Option<i32>,
    pub status_id: Option<i32>,
    pub payment_method_id: Option<i32>,
    /// Inclusive lower bound on total
    pub min_total: Option<Decimal>,
    /// Inclusive upper bound on total
    pub max_total: Option<Decimal>,
    /// Case-insensitive substring match on the delivery address
    pub address: Option<String>,
    /// Inclusive lower bound on the order date (whole day)
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper bound on the order date (whole day)
    pub date_to: Option<NaiveDate>,
    #[serde(default)]
    pub sort_by: OrderSortBy,
    #[serde(default)]
    pub sort_order: SortOrder,
    #[serde(default = "default_page")]
    #[validate(range(min = 1))]
    pub page: u64,
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100))]
    pub limit: u64,
}

impl Default for OrderFilter {
    fn default() -> Self {
        Self {
            user_id: None,
            status_id: None,
            payment_method_id: None,
            min_total: None,
            max_total: None,
            address: None,
            date_from: None,
            date_to: None,
            sort_by: OrderSortBy::default(),
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
    fn test_create_order_requires_at_least_one_product() {
        let input = CreateOrder {
            user_id: 1,
            status_id: 1,
            total: Decimal::new(1000, 2),
            payment_method_id: 1,
            address: None,
            products: vec![],
        };

        assert!(input.validate().is_err());
    }

    #[test]
    fn test_line_item_rejects_zero_quantity() {
        let item = CreateOrderLineItem {
            product_id: 1,
            quantity: 0,
            price: Decimal::new(999, 2),
        };

        assert!(item.validate().is_err());
    }

    #[test]
    fn test_line_item_rejects_non_positive_price() {
        let item = CreateOrderLineItem {
            product_id: 1,
            quantity: 1,
            price: Decimal::ZERO,
        };

        assert!(item.validate().is_err());
    }

    #[test]
    fn test_sort_keys_use_the_api_spelling() {
        let key: OrderSortBy = serde_json::from_str(r#""user_id""#).unwrap();
        assert_eq!(key, OrderSortBy::UserId);

        let key: OrderSortBy = serde_json::from_str(r#""createdAt""#).unwrap();
        assert_eq!(key, OrderSortBy::CreatedAt);
    }
}
