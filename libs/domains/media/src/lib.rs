//! Media domain: the third-party media service client and the image size
//! registry.
//!
//! Uploads pass straight through to an external media service; the catalog
//! domains only persist `(size key, url, public id)` rows. The size registry
//! (`size_images`) names the variants the media pipeline produces, and
//! [`sizes`] holds the size-key dedup rules shared by product and category
//! image writers.

pub mod client;
pub mod config;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod sizes;

pub use client::{HttpMediaStore, MediaStore};
pub use config::MediaConfig;
pub use error::{MediaError, MediaResult};
pub use models::{ImageSizes, SizeImage, SizeVariant, UploadSource, UploadedImage};
pub use repository::{PgSizeRegistry, SizeRegistry};
pub use service::UploadService;
pub use sizes::{allocate_size_keys, display_size};
