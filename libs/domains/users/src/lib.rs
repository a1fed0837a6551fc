//! Users domain: account CRUD with argon2 credential hashing.
//!
//! Password hashes never leave this crate: every response DTO excludes the
//! hash, and the service re-hashes on password change. Deleting a user with
//! orders is refused with a Conflict.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{UserError, UserResult};
pub use models::{CreateUser, UpdateUser, User, UserFilter, UserResponse};
pub use postgres::PgUserRepository;
pub use repository::UserRepository;
pub use service::UserService;
