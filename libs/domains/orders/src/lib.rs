//! Orders domain: order lifecycle processing.
//!
//! An order and its line items form one aggregate: they are created, replaced
//! and deleted together inside a single database transaction, and the order
//! header's `total` must always agree with the sum of its line-item subtotals
//! within a fixed tolerance.
//!
//! Responsibilities are split the usual way, with two extra seams specific to
//! this aggregate:
//!
//! - [`totals`] — pure declared-total validation against the line items
//! - [`line_items`] — full-set replacement of an order's line items, always
//!   on a caller-supplied transaction
//! - [`postgres`] — the transaction orchestrator; the only code that begins,
//!   commits or rolls back transactions
//! - [`service`] — Not-Found pre-reads and the update-total policy, applied
//!   before any transaction is opened

pub mod entity;
pub mod error;
pub mod handlers;
pub mod line_items;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;
pub mod totals;

pub use error::{OrderError, OrderResult};
pub use models::{
    CreateOrder, CreateOrderLineItem, DeleteConfirmation, LineItemDetails, Order, OrderDetails,
    OrderFilter, OrderSortBy, PaymentMethodSummary, ProductSummary, SortOrder, StatusSummary,
    UpdateOrder, UserSummary,
};
pub use postgres::PgOrderRepository;
pub use repository::OrderRepository;
pub use service::OrderService;
