use std::sync::Arc;

use validator::Validate;

use crate::error::{PaymentMethodError, PaymentMethodResult};
use crate::models::{CreatePaymentMethod, PaymentMethod, UpdatePaymentMethod};
use crate::repository::PaymentMethodRepository;

#[derive(Clone)]
pub struct PaymentMethodService<R: PaymentMethodRepository> {
    repository: Arc<R>,
}

impl<R: PaymentMethodRepository> PaymentMethodService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub async fn create_method(
        &self,
        input: CreatePaymentMethod,
    ) -> PaymentMethodResult<PaymentMethod> {
        input
            .validate()
            .map_err(|e| PaymentMethodError::Validation(e.to_string()))?;

        self.repository.create(input).await
    }

    pub async fn get_method(&self, id: i32) -> PaymentMethodResult<PaymentMethod> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(PaymentMethodError::NotFound(id))
    }

    pub async fn list_methods(&self) -> PaymentMethodResult<Vec<PaymentMethod>> {
        self.repository.list().await
    }

    pub async fn update_method(
        &self,
        id: i32,
        input: UpdatePaymentMethod,
    ) -> PaymentMethodResult<PaymentMethod> {
        input
            .validate()
            .map_err(|e| PaymentMethodError::Validation(e.to_string()))?;

        self.repository.update(id, input).await
    }

    pub async fn delete_method(&self, id: i32) -> PaymentMethodResult<()> {
        if !self.repository.delete(id).await? {
            return Err(PaymentMethodError::NotFound(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockPaymentMethodRepository;

    #[tokio::test]
    async fn test_delete_referenced_method_conflicts() {
        let mut repo = MockPaymentMethodRepository::new();
        repo.expect_delete().returning(|_| {
            Err(PaymentMethodError::HasDependents(
                "has associated orders".into(),
            ))
        });

        let service = PaymentMethodService::new(repo);
        assert!(matches!(
            service.delete_method(2).await,
            Err(PaymentMethodError::HasDependents(_))
        ));
    }

    #[tokio::test]
    async fn test_duplicate_identifier_conflicts() {
        let mut repo = MockPaymentMethodRepository::new();
        repo.expect_create()
            .returning(|input| Err(PaymentMethodError::DuplicateIdentifier(input.identifier)));

        let service = PaymentMethodService::new(repo);
        let result = service
            .create_method(CreatePaymentMethod {
                identifier: "cash".into(),
                name: "Cash".into(),
            })
            .await;

        assert!(matches!(
            result,
            Err(PaymentMethodError::DuplicateIdentifier(_))
        ));
    }
}
