use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use axum_helpers::pagination::{default_limit, default_page};

/// A catalog category with its image variants
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub slug: Option<String>,
    /// Legacy single-image URL kept alongside the variant set
    pub image: Option<String>,
    pub images: Vec<ImageSummary>,
}

/// One persisted image variant as reported to API consumers: always the bare
/// size label, never the deduplicated storage key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ImageSummary {
    pub size: String,
    pub url: String,
}

/// One image variant supplied by a client (as returned by the upload
/// endpoints).
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ImageInput {
    #[validate(length(min = 1, max = 50))]
    pub size: String,
    #[validate(length(min = 1, max = 500))]
    pub url: String,
    #[validate(length(min = 1, max = 255))]
    pub public_id: String,
}

/// DTO for creating a category
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCategory {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub slug: Option<String>,
    #[validate(length(min = 1, max = 500))]
    pub image: Option<String>,
    /// Replaces the whole image set when present and non-empty
    #[serde(default)]
    #[validate(nested)]
    pub images: Vec<ImageInput>,
}

/// DTO for partially updating a category
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCategory {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub slug: Option<String>,
    #[validate(length(min = 1, max = 500))]
    pub image: Option<String>,
    /// Replaces the whole image set when present and non-empty
    #[validate(nested)]
    pub images: Option<Vec<ImageInput>>,
}

/// Sort keys accepted when listing categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CategorySortBy {
    Id,
    #[default]
    Name,
    Slug,
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

/// Query filters for listing categories
#[derive(Debug, Clone, Deserialize, Validate, ToSchema, IntoParams)]
pub struct CategoryFilter {
    /// Case-insensitive substring match on name
    pub name: Option<String>,
    /// Case-insensitive substring match on slug
    pub slug: Option<String>,
    #[serde(default)]
    pub sort_by: CategorySortBy,
    #[serde(default)]
    pub sort_order: SortOrder,
    #[serde(default = "default_page")]
    #[validate(range(min = 1))]
    pub page: u64,
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100))]
    pub limit: u64,
}

impl Default for CategoryFilter {
    fn default() -> Self {
        Self {
            name: None,
            slug: None,
            sort_by: CategorySortBy::default(),
            sort_order: SortOrder::default(),
            page: default_page(),
            limit: default_limit(),
        }
    }
}
