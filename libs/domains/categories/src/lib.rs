//! Categories domain: catalog category CRUD with an owned image set.
//!
//! A category can carry a set of media-service image variants; creating or
//! updating with an image list replaces the whole set (size-key dedup rules
//! live in `domain_media::sizes`). Deleting a category that products still
//! reference is refused with a Conflict.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod images;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{CategoryError, CategoryResult};
pub use models::{
    Category, CategoryFilter, CategorySortBy, CreateCategory, ImageInput, ImageSummary,
    SortOrder, UpdateCategory,
};
pub use postgres::PgCategoryRepository;
pub use repository::CategoryRepository;
pub use service::CategoryService;
