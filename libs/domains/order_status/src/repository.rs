use async_trait::async_trait;

use crate::error::OrderStatusResult;
use crate::models::{CreateOrderStatus, OrderStatus, UpdateOrderStatus};

/// Repository trait for order status persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderStatusRepository: Send + Sync {
    async fn create(&self, input: CreateOrderStatus) -> OrderStatusResult<OrderStatus>;

    async fn find_by_id(&self, id: i32) -> OrderStatusResult<Option<OrderStatus>>;

    async fn list(&self) -> OrderStatusResult<Vec<OrderStatus>>;

    async fn update(&self, id: i32, input: UpdateOrderStatus) -> OrderStatusResult<OrderStatus>;

    /// Fails with `HasDependents` when orders still reference the status.
    async fn delete(&self, id: i32) -> OrderStatusResult<bool>;
}
