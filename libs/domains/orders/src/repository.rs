use async_trait::async_trait;
use axum_helpers::Paginated;

use crate::error::OrderResult;
use crate::models::{CreateOrder, Order, OrderDetails, OrderFilter, UpdateOrder};

/// Repository trait for the order aggregate.
///
/// Write operations are atomic over the header and its line items: the
/// implementation owns the transaction and either commits everything or
/// leaves the prior committed state unchanged.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Insert the header and its line items, then return the materialized
    /// order. Fails with `MissingReference` when a referenced row is absent.
    async fn create(&self, input: CreateOrder) -> OrderResult<OrderDetails>;

    /// The header only; used for cheap existence checks before any
    /// transaction is opened.
    async fn find_header(&self, id: i32) -> OrderResult<Option<Order>>;

    async fn find_by_id(&self, id: i32) -> OrderResult<Option<OrderDetails>>;

    async fn list(&self, filter: OrderFilter) -> OrderResult<Paginated<OrderDetails>>;

    /// Apply only the header fields present in the DTO; replace the line-item
    /// set when a non-empty one is supplied.
    async fn update(&self, id: i32, input: UpdateOrder) -> OrderResult<OrderDetails>;

    /// Delete line items then the header in one transaction.
    async fn delete(&self, id: i32) -> OrderResult<()>;
}
