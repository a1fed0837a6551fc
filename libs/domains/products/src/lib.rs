//! Products domain: catalog product CRUD with brand/category summaries and
//! an owned image set.
//!
//! Products reference brands and categories (summaries are attached to every
//! response) and own a set of media-service image variants with the same
//! replace-all + size-key dedup semantics as categories. Deleting a product
//! that order line items still reference is refused with a Conflict.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod images;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{ProductError, ProductResult};
pub use models::{
    BrandSummary, CategorySummary, CreateProduct, ImageInput, ImageSummary, Product,
    ProductFilter, ProductSortBy, SortOrder, UpdateProduct,
};
pub use postgres::PgProductRepository;
pub use repository::ProductRepository;
pub use service::ProductService;
