//! Brands domain: catalog brand CRUD with guarded deletes.
//!
//! Layering follows the usual handlers → service → repository → entity split.
//! Deleting a brand that products still reference surfaces as a Conflict via
//! the store's foreign-key violation, translated in the Postgres repository.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{BrandError, BrandResult};
pub use models::{Brand, BrandFilter, BrandSortBy, CreateBrand, SortOrder, UpdateBrand};
pub use postgres::PgBrandRepository;
pub use repository::BrandRepository;
pub use service::BrandService;
