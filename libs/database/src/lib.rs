//! Database library providing the PostgreSQL connector and shared utilities.
//!
//! # Examples
//!
//! ```ignore
//! use core_config::FromEnv;
//! use database::postgres::{self, PostgresConfig};
//! use migration::Migrator;
//!
//! let config = PostgresConfig::from_env()?;
//! let db = postgres::connect_from_config_with_retry(config, None).await?;
//! postgres::run_migrations::<Migrator>(&db, "catalog-api").await?;
//! ```

pub mod common;
pub mod postgres;

pub use common::{ConstraintViolation, DatabaseError, DatabaseResult, constraint_violation};
