pub mod config;
pub mod connector;
pub mod health;

pub use config::PostgresConfig;
pub use connector::{
    connect, connect_from_config, connect_from_config_with_retry, connect_with_options,
    connect_with_retry, run_migrations,
};
pub use health::ping;

// Re-export so downstream crates can name the pool type without depending on
// sea-orm directly.
pub use sea_orm::DatabaseConnection;
