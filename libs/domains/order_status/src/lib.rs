//! Order status lookup domain.
//!
//! Statuses are a small seeded lookup table (`pending`, `processing`, ...)
//! that orders reference. Deleting one that orders still use is refused with
//! a Conflict, translated from the store's foreign-key violation.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{OrderStatusError, OrderStatusResult};
pub use models::{CreateOrderStatus, OrderStatus, UpdateOrderStatus};
pub use postgres::PgOrderStatusRepository;
pub use repository::OrderStatusRepository;
pub use service::OrderStatusService;
