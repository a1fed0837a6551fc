use std::sync::Arc;

use validator::Validate;

use crate::error::{OrderStatusError, OrderStatusResult};
use crate::models::{CreateOrderStatus, OrderStatus, UpdateOrderStatus};
use crate::repository::OrderStatusRepository;

#[derive(Clone)]
pub struct OrderStatusService<R: OrderStatusRepository> {
    repository: Arc<R>,
}

impl<R: OrderStatusRepository> OrderStatusService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub async fn create_status(&self, input: CreateOrderStatus) -> OrderStatusResult<OrderStatus> {
        input
            .validate()
            .map_err(|e| OrderStatusError::Validation(e.to_string()))?;

        self.repository.create(input).await
    }

    pub async fn get_status(&self, id: i32) -> OrderStatusResult<OrderStatus> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(OrderStatusError::NotFound(id))
    }

    pub async fn list_statuses(&self) -> OrderStatusResult<Vec<OrderStatus>> {
        self.repository.list().await
    }

    pub async fn update_status(
        &self,
        id: i32,
        input: UpdateOrderStatus,
    ) -> OrderStatusResult<OrderStatus> {
        input
            .validate()
            .map_err(|e| OrderStatusError::Validation(e.to_string()))?;

        self.repository.update(id, input).await
    }

    pub async fn delete_status(&self, id: i32) -> OrderStatusResult<()> {
        if !self.repository.delete(id).await? {
            return Err(OrderStatusError::NotFound(id));
        }
        Ok(())
    }
}
