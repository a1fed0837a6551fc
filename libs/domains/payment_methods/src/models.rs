use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A way an order can be paid
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaymentMethod {
    pub id: i32,
    /// Stable machine identifier, e.g. "credit_card"
    pub identifier: String,
    /// Display name, e.g. "Credit card"
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreatePaymentMethod {
    #[validate(length(min = 1, max = 50))]
    pub identifier: String,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdatePaymentMethod {
    #[validate(length(min = 1, max = 50))]
    pub identifier: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
}
