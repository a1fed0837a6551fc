use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A lifecycle status an order can be in
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderStatus {
    pub id: i32,
    /// Stable machine identifier, e.g. "pending"
    pub identifier: String,
    /// Display name, e.g. "Pending"
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateOrderStatus {
    #[validate(length(min = 1, max = 50))]
    pub identifier: String,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateOrderStatus {
    #[validate(length(min = 1, max = 50))]
    pub identifier: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
}
