//! Server infrastructure: router assembly with OpenAPI docs and middleware,
//! health endpoints, and graceful shutdown.

pub mod app;
pub mod health;
pub mod shutdown;

pub use app::{create_app, create_production_app, create_router};
pub use health::{HealthResponse, ReadyResponse, health_router};
pub use shutdown::shutdown_signal;
