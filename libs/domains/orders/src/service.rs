use std::sync::Arc;

use axum_helpers::Paginated;
use validator::Validate;

use crate::error::{OrderError, OrderResult};
use crate::models::{
    CreateOrder, DeleteConfirmation, OrderDetails, OrderFilter, UpdateOrder,
};
use crate::repository::OrderRepository;
use crate::totals;

/// Service layer for order lifecycle policy.
///
/// Everything here happens before any transaction is opened: structural
/// validation, the declared-total check, Not-Found pre-reads, and the
/// update-total recomputation. The repository below owns atomicity.
#[derive(Clone)]
pub struct OrderService<R: OrderRepository> {
    repository: Arc<R>,
}

impl<R: OrderRepository> OrderService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create an order with its line items.
    ///
    /// The declared total must agree with the line-item sum before anything
    /// is written.
    pub async fn create_order(&self, input: CreateOrder) -> OrderResult<OrderDetails> {
        input
            .validate()
            .map_err(|e| OrderError::Validation(e.to_string()))?;

        totals::validate_declared_total(&input.products, input.total)?;

        self.repository.create(input).await
    }

    pub async fn get_order(&self, id: i32) -> OrderResult<OrderDetails> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(OrderError::NotFound(id))
    }

    pub async fn list_orders(&self, filter: OrderFilter) -> OrderResult<Paginated<OrderDetails>> {
        filter
            .validate()
            .map_err(|e| OrderError::Validation(e.to_string()))?;

        self.repository.list(filter).await
    }

    /// Listing scoped to one user: the same filters with `user_id` fixed.
    pub async fn list_orders_for_user(
        &self,
        user_id: i32,
        mut filter: OrderFilter,
    ) -> OrderResult<Paginated<OrderDetails>> {
        filter.user_id = Some(user_id);
        self.list_orders(filter).await
    }

    /// Partially update an order.
    ///
    /// When a non-empty replacement line-item set is supplied, the total is
    /// re-validated: a declared total must agree with the computed sum, and
    /// an absent one is set to the computed sum, which becomes authoritative.
    pub async fn update_order(
        &self,
        id: i32,
        mut input: UpdateOrder,
    ) -> OrderResult<OrderDetails> {
        input
            .validate()
            .map_err(|e| OrderError::Validation(e.to_string()))?;

        self.repository
            .find_header(id)
            .await?
            .ok_or(OrderError::NotFound(id))?;

        if let Some(products) = &input.products {
            if !products.is_empty() {
                match input.total {
                    Some(declared) => {
                        totals::validate_declared_total(products, declared)?;
                    }
                    None => {
                        input.total = Some(totals::line_total(products));
                    }
                }
            }
        }

        self.repository.update(id, input).await
    }

    /// Delete an order and its line items.
    ///
    /// The existence check runs first, outside any transaction; a missing id
    /// never opens a mutating transaction.
    pub async fn remove_order(&self, id: i32) -> OrderResult<DeleteConfirmation> {
        self.repository
            .find_header(id)
            .await?
            .ok_or(OrderError::NotFound(id))?;

        self.repository.delete(id).await?;

        Ok(DeleteConfirmation {
            message: format!("Order with id {} deleted successfully", id),
        })
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate;
    use rust_decimal::Decimal;

    use super::*;
    use crate::models::{CreateOrderLineItem, Order};
    use crate::repository::MockOrderRepository;

    fn line_item(product_id: i32, price: &str, quantity: i32) -> CreateOrderLineItem {
        CreateOrderLineItem {
            product_id,
            quantity,
            price: price.parse().unwrap(),
        }
    }

    fn create_input(total: &str) -> CreateOrder {
        CreateOrder {
            user_id: 1,
            status_id: 1,
            total: total.parse().unwrap(),
            payment_method_id: 1,
            address: None,
            products: vec![line_item(4, "99.99", 2), line_item(5, "149.99", 1)],
        }
    }

    fn header(id: i32) -> Order {
        let now = chrono::Utc::now();
        Order {
            id,
            user_id: 1,
            status_id: 1,
            total: "349.97".parse().unwrap(),
            date: now,
            payment_method_id: 1,
            address: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn details(id: i32) -> OrderDetails {
        let now = chrono::Utc::now();
        OrderDetails {
            id,
            user_id: 1,
            status_id: 1,
            total: "349.97".parse().unwrap(),
            date: now,
            payment_method_id: 1,
            address: None,
            created_at: now,
            updated_at: now,
            user: None,
            status: None,
            payment_method: None,
            products: vec![],
        }
    }

    #[tokio::test]
    async fn test_create_with_matching_total_succeeds() {
        let mut repo = MockOrderRepository::new();
        repo.expect_create().returning(|_| Ok(details(1)));

        let service = OrderService::new(repo);
        let order = service.create_order(create_input("349.97")).await.unwrap();
        assert_eq!(order.id, 1);
    }

    #[tokio::test]
    async fn test_create_with_mismatched_total_never_reaches_the_repository() {
        // no expectations: any repository call would panic the test
        let repo = MockOrderRepository::new();
        let service = OrderService::new(repo);

        let err = service
            .create_order(create_input("350.50"))
            .await
            .unwrap_err();

        match err {
            OrderError::TotalMismatch { computed, .. } => {
                assert_eq!(computed, "349.97".parse::<Decimal>().unwrap());
            }
            other => panic!("expected TotalMismatch, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_with_empty_product_list_is_a_validation_error() {
        let repo = MockOrderRepository::new();
        let service = OrderService::new(repo);

        let mut input = create_input("349.97");
        input.products.clear();

        assert!(matches!(
            service.create_order(input).await,
            Err(OrderError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_update_computed_total_becomes_authoritative_when_absent() {
        let mut repo = MockOrderRepository::new();
        repo.expect_find_header()
            .with(predicate::eq(9))
            .returning(|id| Ok(Some(header(id))));
        repo.expect_update()
            .withf(|_, input| input.total == Some("349.97".parse().unwrap()))
            .returning(|id, _| Ok(details(id)));

        let service = OrderService::new(repo);
        let input = UpdateOrder {
            products: Some(vec![line_item(4, "99.99", 2), line_item(5, "149.99", 1)]),
            ..Default::default()
        };

        service.update_order(9, input).await.unwrap();
    }

    #[tokio::test]
    async fn test_update_with_disagreeing_total_fails_before_any_write() {
        let mut repo = MockOrderRepository::new();
        repo.expect_find_header().returning(|id| Ok(Some(header(id))));
        // expect_update deliberately absent: a call would panic

        let service = OrderService::new(repo);
        let input = UpdateOrder {
            total: Some("350.50".parse().unwrap()),
            products: Some(vec![line_item(4, "99.99", 2), line_item(5, "149.99", 1)]),
            ..Default::default()
        };

        assert!(matches!(
            service.update_order(9, input).await,
            Err(OrderError::TotalMismatch { .. })
        ));
    }

    #[tokio::test]
    async fn test_update_without_products_skips_total_validation() {
        let mut repo = MockOrderRepository::new();
        repo.expect_find_header().returning(|id| Ok(Some(header(id))));
        repo.expect_update()
            .withf(|_, input| input.total.is_none() && input.address.is_some())
            .returning(|id, _| Ok(details(id)));

        let service = OrderService::new(repo);
        let input = UpdateOrder {
            address: Some("New address 1".into()),
            ..Default::default()
        };

        service.update_order(9, input).await.unwrap();
    }

    #[tokio::test]
    async fn test_update_missing_order_is_not_found() {
        let mut repo = MockOrderRepository::new();
        repo.expect_find_header().returning(|_| Ok(None));

        let service = OrderService::new(repo);
        assert!(matches!(
            service.update_order(404, UpdateOrder::default()).await,
            Err(OrderError::NotFound(404))
        ));
    }

    #[tokio::test]
    async fn test_remove_missing_order_never_touches_the_store() {
        let mut repo = MockOrderRepository::new();
        repo.expect_find_header().returning(|_| Ok(None));
        // expect_delete deliberately absent: a call would panic

        let service = OrderService::new(repo);
        assert!(matches!(
            service.remove_order(404).await,
            Err(OrderError::NotFound(404))
        ));
    }

    #[tokio::test]
    async fn test_remove_confirms_with_the_order_id() {
        let mut repo = MockOrderRepository::new();
        repo.expect_find_header().returning(|id| Ok(Some(header(id))));
        repo.expect_delete()
            .with(predicate::eq(7))
            .returning(|_| Ok(()));

        let service = OrderService::new(repo);
        let confirmation = service.remove_order(7).await.unwrap();
        assert!(confirmation.message.contains('7'));
    }

    #[tokio::test]
    async fn test_list_for_user_pins_the_user_filter() {
        let mut repo = MockOrderRepository::new();
        repo.expect_list()
            .withf(|filter| filter.user_id == Some(5))
            .returning(|filter| Ok(Paginated::new(vec![], 0, filter.page, filter.limit)));

        let service = OrderService::new(repo);
        let filter = OrderFilter {
            user_id: Some(999), // overridden by the path parameter
            ..Default::default()
        };

        service.list_orders_for_user(5, filter).await.unwrap();
    }

    #[tokio::test]
    async fn test_list_rejects_out_of_range_limit() {
        let repo = MockOrderRepository::new();
        let service = OrderService::new(repo);

        let filter = OrderFilter {
            limit: 500,
            ..Default::default()
        };

        assert!(matches!(
            service.list_orders(filter).await,
            Err(OrderError::Validation(_))
        ));
    }
}
