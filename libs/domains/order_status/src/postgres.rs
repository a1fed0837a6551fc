use async_trait::async_trait;
use database::{ConstraintViolation, constraint_violation};
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder};

use crate::entity;
use crate::error::{OrderStatusError, OrderStatusResult};
use crate::models::{CreateOrderStatus, OrderStatus, UpdateOrderStatus};
use crate::repository::OrderStatusRepository;

pub struct PgOrderStatusRepository {
    db: DatabaseConnection,
}

impl PgOrderStatusRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn internal(e: DbErr) -> OrderStatusError {
    OrderStatusError::Internal(format!("Database error: {}", e))
}

#[async_trait]
impl OrderStatusRepository for PgOrderStatusRepository {
    async fn create(&self, input: CreateOrderStatus) -> OrderStatusResult<OrderStatus> {
        let identifier = input.identifier.clone();

        let model = entity::ActiveModel {
            identifier: Set(input.identifier),
            name: Set(input.name),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| match constraint_violation(&e) {
            Some(ConstraintViolation::Unique(_)) => {
                OrderStatusError::DuplicateIdentifier(identifier)
            }
            _ => internal(e),
        })?;

        tracing::info!(status_id = model.id, "Created order status");
        Ok(model.into())
    }

    async fn find_by_id(&self, id: i32) -> OrderStatusResult<Option<OrderStatus>> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(internal)?;

        Ok(model.map(Into::into))
    }

    async fn list(&self) -> OrderStatusResult<Vec<OrderStatus>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await
            .map_err(internal)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update(&self, id: i32, input: UpdateOrderStatus) -> OrderStatusResult<OrderStatus> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(internal)?
            .ok_or(OrderStatusError::NotFound(id))?;

        let mut active: entity::ActiveModel = model.into();
        let new_identifier = input.identifier.clone();
        if let Some(identifier) = input.identifier {
            active.identifier = Set(identifier);
        }
        if let Some(name) = input.name {
            active.name = Set(name);
        }

        let updated = active.update(&self.db).await.map_err(|e| {
            match (constraint_violation(&e), new_identifier) {
                (Some(ConstraintViolation::Unique(_)), Some(identifier)) => {
                    OrderStatusError::DuplicateIdentifier(identifier)
                }
                _ => internal(e),
            }
        })?;

        tracing::info!(status_id = id, "Updated order status");
        Ok(updated.into())
    }

    async fn delete(&self, id: i32) -> OrderStatusResult<bool> {
        let result = entity::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| match constraint_violation(&e) {
                Some(ConstraintViolation::ForeignKey(_)) => OrderStatusError::HasDependents(
                    "Cannot delete order status: it has associated orders.".to_string(),
                ),
                _ => internal(e),
            })?;

        if result.rows_affected > 0 {
            tracing::info!(status_id = id, "Deleted order status");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
