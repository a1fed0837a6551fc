use async_trait::async_trait;

use crate::error::PaymentMethodResult;
use crate::models::{CreatePaymentMethod, PaymentMethod, UpdatePaymentMethod};

/// Repository trait for payment method persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentMethodRepository: Send + Sync {
    async fn create(&self, input: CreatePaymentMethod) -> PaymentMethodResult<PaymentMethod>;

    async fn find_by_id(&self, id: i32) -> PaymentMethodResult<Option<PaymentMethod>>;

    async fn list(&self) -> PaymentMethodResult<Vec<PaymentMethod>>;

    async fn update(
        &self,
        id: i32,
        input: UpdatePaymentMethod,
    ) -> PaymentMethodResult<PaymentMethod>;

    /// Fails with `HasDependents` when orders still reference the method.
    async fn delete(&self, id: i32) -> PaymentMethodResult<bool>;
}
