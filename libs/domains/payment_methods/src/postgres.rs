use async_trait::async_trait;
use database::{ConstraintViolation, constraint_violation};
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder};

use crate::entity;
use crate::error::{PaymentMethodError, PaymentMethodResult};
use crate::models::{CreatePaymentMethod, PaymentMethod, UpdatePaymentMethod};
use crate::repository::PaymentMethodRepository;

pub struct PgPaymentMethodRepository {
    db: DatabaseConnection,
}

impl PgPaymentMethodRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn internal(e: DbErr) -> PaymentMethodError {
    PaymentMethodError::Internal(format!("Database error: {}", e))
}

#[async_trait]
impl PaymentMethodRepository for PgPaymentMethodRepository {
    async fn create(&self, input: CreatePaymentMethod) -> PaymentMethodResult<PaymentMethod> {
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
                PaymentMethodError::DuplicateIdentifier(identifier)
            }
            _ => internal(e),
        })?;

        tracing::info!(payment_method_id = model.id, "Created payment method");
        Ok(model.into())
    }

    async fn find_by_id(&self, id: i32) -> PaymentMethodResult<Option<PaymentMethod>> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(internal)?;

        Ok(model.map(Into::into))
    }

    async fn list(&self) -> PaymentMethodResult<Vec<PaymentMethod>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await
            .map_err(internal)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update(
        &self,
        id: i32,
        input: UpdatePaymentMethod,
    ) -> PaymentMethodResult<PaymentMethod> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(internal)?
            .ok_or(PaymentMethodError::NotFound(id))?;

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
                    PaymentMethodError::DuplicateIdentifier(identifier)
                }
                _ => internal(e),
            }
        })?;

        tracing::info!(payment_method_id = id, "Updated payment method");
        Ok(updated.into())
    }

    async fn delete(&self, id: i32) -> PaymentMethodResult<bool> {
        let result = entity::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| match constraint_violation(&e) {
                Some(ConstraintViolation::ForeignKey(_)) => PaymentMethodError::HasDependents(
                    "Cannot delete payment method: it has associated orders.".to_string(),
                ),
                _ => internal(e),
            })?;

        if result.rows_affected > 0 {
            tracing::info!(payment_method_id = id, "Deleted payment method");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
