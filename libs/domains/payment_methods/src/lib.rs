//! Payment method lookup domain.
//!
//! A seeded lookup table (`cash`, `credit_card`, ...) that orders reference.
//! Deleting a method still referenced by orders is refused with a Conflict.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{PaymentMethodError, PaymentMethodResult};
pub use models::{CreatePaymentMethod, PaymentMethod, UpdatePaymentMethod};
pub use postgres::PgPaymentMethodRepository;
pub use repository::PaymentMethodRepository;
pub use service::PaymentMethodService;
