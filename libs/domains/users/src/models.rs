use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use axum_helpers::pagination::{default_limit, default_page};

/// A user account, including the credential hash.
///
/// Internal representation only; handlers return [`UserResponse`], which
/// excludes the hash.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub password_hash: String,
    pub full_name: Option<String>,
    pub phone: Option<String>,
}

/// The user shape returned by the API; never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i32,
    pub email: String,
    pub full_name: Option<String>,
    pub phone: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            phone: user.phone,
        }
    }
}

/// DTO for creating a user
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(email)]
    pub email: String,
    /// Plain-text password; hashed before it reaches the store
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    #[validate(length(min = 1, max = 150))]
    pub full_name: Option<String>,
    #[validate(length(min = 1, max = 30))]
    pub phone: Option<String>,
}

/// DTO for partially updating a user
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUser {
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 8, max = 128))]
    pub password: Option<String>,
    #[validate(length(min = 1, max = 150))]
    pub full_name: Option<String>,
    #[validate(length(min = 1, max = 30))]
    pub phone: Option<String>,
}

/// Sort keys accepted when listing users
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum UserSortBy {
    #[default]
    Id,
    Email,
    FullName,
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    #[default]
    Asc,
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

/// Query filters for listing users
#[derive(Debug, Clone, Deserialize, Validate, ToSchema, IntoParams)]
pub struct UserFilter {
    /// Case-insensitive substring match on email
    pub email: Option<String>,
    /// Case-insensitive substring match on full name
    pub full_name: Option<String>,
    #[serde(default)]
    pub sort_by: UserSortBy,
    #[serde(default)]
    pub sort_order: SortOrder,
    #[serde(default = "default_page")]
    #[validate(range(min = 1))]
    pub page: u64,
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100))]
    pub limit: u64,
}

impl Default for UserFilter {
    fn default() -> Self {
        Self {
            email: None,
            full_name: None,
            sort_by: UserSortBy::default(),
            sort_order: SortOrder::default(),
            page: default_page(),
            limit: default_limit(),
        }
    }
}
