use std::collections::HashMap;

use async_trait::async_trait;
use axum_helpers::{Paginated, pagination::offset_for};
use chrono::NaiveTime;
use database::{ConstraintViolation, constraint_violation};
use sea_orm::ActiveValue::Set;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select, TransactionTrait,
};

use crate::entity::{order, order_product};
use crate::error::{OrderError, OrderResult};
use crate::line_items;
use crate::models::{
    CreateOrder, LineItemDetails, Order, OrderDetails, OrderFilter, OrderSortBy,
    PaymentMethodSummary, ProductSummary, StatusSummary, UpdateOrder, UserSummary,
};
use crate::repository::OrderRepository;

/// Postgres implementation of the order repository.
///
/// This is the transaction orchestrator: every write begins a transaction
/// here, runs the header write and the line-item writer on that transaction,
/// and commits or rolls back as one outcome. No other code in the crate
/// touches transaction boundaries.
pub struct PgOrderRepository {
    pub(crate) db: DatabaseConnection,
}

impl PgOrderRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn materialize_many(
        &self,
        orders: Vec<order::Model>,
    ) -> OrderResult<Vec<OrderDetails>> {
        if orders.is_empty() {
            return Ok(Vec::new());
        }

        let order_ids: Vec<i32> = orders.iter().map(|o| o.id).collect();
        let user_ids: Vec<i32> = orders.iter().map(|o| o.user_id).collect();
        let status_ids: Vec<i32> = orders.iter().map(|o| o.status_id).collect();
        let method_ids: Vec<i32> = orders.iter().map(|o| o.payment_method_id).collect();

        let users: HashMap<i32, UserSummary> = domain_users::entity::Entity::find()
            .filter(domain_users::entity::Column::Id.is_in(user_ids))
            .all(&self.db)
            .await
            .map_err(internal)?
            .into_iter()
            .map(|u| {
                (
                    u.id,
                    UserSummary {
                        id: u.id,
                        email: u.email,
                        full_name: u.full_name,
                        phone: u.phone,
                    },
                )
            })
            .collect();

        let statuses: HashMap<i32, StatusSummary> = domain_order_status::entity::Entity::find()
            .filter(domain_order_status::entity::Column::Id.is_in(status_ids))
            .all(&self.db)
            .await
            .map_err(internal)?
            .into_iter()
            .map(|s| {
                (
                    s.id,
                    StatusSummary {
                        id: s.id,
                        identifier: s.identifier,
                        name: s.name,
                    },
                )
            })
            .collect();

        let methods: HashMap<i32, PaymentMethodSummary> =
            domain_payment_methods::entity::Entity::find()
                .filter(domain_payment_methods::entity::Column::Id.is_in(method_ids))
                .all(&self.db)
                .await
                .map_err(internal)?
                .into_iter()
                .map(|m| {
                    (
                        m.id,
                        PaymentMethodSummary {
                            id: m.id,
                            identifier: m.identifier,
                            name: m.name,
                        },
                    )
                })
                .collect();

        let items = order_product::Entity::find()
            .filter(order_product::Column::OrderId.is_in(order_ids))
            .order_by_asc(order_product::Column::Id)
            .all(&self.db)
            .await
            .map_err(internal)?;

        let product_ids: Vec<i32> = items.iter().map(|i| i.product_id).collect();
        let products: HashMap<i32, ProductSummary> = if product_ids.is_empty() {
            HashMap::new()
        } else {
            domain_products::entity::product::Entity::find()
                .filter(domain_products::entity::product::Column::Id.is_in(product_ids))
                .all(&self.db)
                .await
                .map_err(internal)?
                .into_iter()
                .map(|p| {
                    (
                        p.id,
                        ProductSummary {
                            id: p.id,
                            name: p.name,
                            sku: p.sku,
                            price: p.price,
                        },
                    )
                })
                .collect()
        };

        let mut grouped_items: HashMap<i32, Vec<LineItemDetails>> = HashMap::new();
        for item in items {
            grouped_items
                .entry(item.order_id)
                .or_default()
                .push(LineItemDetails {
                    id: item.id,
                    product_id: item.product_id,
                    quantity: item.quantity,
                    price: item.price,
                    sub_total: item.sub_total,
                    product: products.get(&item.product_id).cloned(),
                });
        }

        Ok(orders
            .into_iter()
            .map(|model| OrderDetails {
                user: users.get(&model.user_id).cloned(),
                status: statuses.get(&model.status_id).cloned(),
                payment_method: methods.get(&model.payment_method_id).cloned(),
                products: grouped_items.remove(&model.id).unwrap_or_default(),
                id: model.id,
                user_id: model.user_id,
                status_id: model.status_id,
                total: model.total,
                date: model.date.into(),
                payment_method_id: model.payment_method_id,
                address: model.address,
                created_at: model.created_at.into(),
                updated_at: model.updated_at.into(),
            })
            .collect())
    }
}

fn internal(e: DbErr) -> OrderError {
    OrderError::Internal(format!("Database error: {}", e))
}

/// A foreign-key violation during a write means a referenced row is missing;
/// name which side from the constraint the store reports.
fn map_write_err(e: DbErr) -> OrderError {
    match constraint_violation(&e) {
        Some(ConstraintViolation::ForeignKey(msg)) => {
            let reference = if msg.contains("fk_orders_user_id") {
                "user"
            } else if msg.contains("fk_orders_status_id") {
                "order status"
            } else if msg.contains("fk_orders_payment_method_id") {
                "payment method"
            } else if msg.contains("fk_order_products_product_id") {
                "product"
            } else {
                "referenced row"
            };
            OrderError::MissingReference(format!("Referenced {} does not exist", reference))
        }
        _ => internal(e),
    }
}

fn sort_column(sort_by: OrderSortBy) -> order::Column {
    match sort_by {
        OrderSortBy::Id => order::Column::Id,
        OrderSortBy::Total => order::Column::Total,
        OrderSortBy::Date => order::Column::Date,
        OrderSortBy::UserId => order::Column::UserId,
        OrderSortBy::StatusId => order::Column::StatusId,
        OrderSortBy::CreatedAt => order::Column::CreatedAt,
        OrderSortBy::UpdatedAt => order::Column::UpdatedAt,
    }
}

/// Assemble the filter predicates for a listing query.
pub(crate) fn build_list_query(filter: &OrderFilter) -> Select<order::Entity> {
    let mut query = order::Entity::find();

    if let Some(user_id) = filter.user_id {
        query = query.filter(order::Column::UserId.eq(user_id));
    }

    if let Some(status_id) = filter.status_id {
        query = query.filter(order::Column::StatusId.eq(status_id));
    }

    if let Some(payment_method_id) = filter.payment_method_id {
        query = query.filter(order::Column::PaymentMethodId.eq(payment_method_id));
    }

    if let Some(min_total) = filter.min_total {
        query = query.filter(order::Column::Total.gte(min_total));
    }

    if let Some(max_total) = filter.max_total {
        query = query.filter(order::Column::Total.lte(max_total));
    }

    if let Some(address) = &filter.address {
        use sea_orm::sea_query::extension::postgres::PgExpr;
        query = query.filter(
            Expr::col((order::Entity, order::Column::Address)).ilike(format!("%{}%", address)),
        );
    }

    if let Some(from) = filter.date_from {
        query = query.filter(order::Column::Date.gte(from.and_time(NaiveTime::MIN).and_utc()));
    }

    if let Some(to) = filter.date_to {
        // inclusive of the whole date_to day: strictly before the next midnight
        if let Some(next_day) = to.succ_opt() {
            query = query
                .filter(order::Column::Date.lt(next_day.and_time(NaiveTime::MIN).and_utc()));
        }
    }

    query
}

/// Apply the allow-listed sort key and offset/limit pagination.
pub(crate) fn page_and_sort(
    query: Select<order::Entity>,
    filter: &OrderFilter,
) -> Select<order::Entity> {
    query
        .order_by(sort_column(filter.sort_by), filter.sort_order.into())
        .limit(filter.limit)
        .offset(offset_for(filter.page, filter.limit))
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn create(&self, input: CreateOrder) -> OrderResult<OrderDetails> {
        let txn = self.db.begin().await.map_err(internal)?;

        let header = order::ActiveModel {
            user_id: Set(input.user_id),
            status_id: Set(input.status_id),
            total: Set(input.total),
            payment_method_id: Set(input.payment_method_id),
            address: Set(input.address.clone()),
            ..Default::default()
        };

        let result: Result<i32, DbErr> = async {
            let inserted = header.insert(&txn).await?;
            line_items::insert_all(&txn, inserted.id, &input.products).await?;
            Ok(inserted.id)
        }
        .await;

        match result {
            Ok(id) => {
                txn.commit().await.map_err(internal)?;
                tracing::info!(order_id = id, "Created order");
                self.find_by_id(id).await?.ok_or(OrderError::NotFound(id))
            }
            Err(err) => {
                txn.rollback().await.map_err(internal)?;
                Err(map_write_err(err))
            }
        }
    }

    async fn find_header(&self, id: i32) -> OrderResult<Option<Order>> {
        let model = order::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(internal)?;

        Ok(model.map(Into::into))
    }

    async fn find_by_id(&self, id: i32) -> OrderResult<Option<OrderDetails>> {
        let model = order::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(internal)?;

        match model {
            Some(model) => {
                let mut details = self.materialize_many(vec![model]).await?;
                Ok(details.pop())
            }
            None => Ok(None),
        }
    }

    async fn list(&self, filter: OrderFilter) -> OrderResult<Paginated<OrderDetails>> {
        let query = build_list_query(&filter);

        let total = query.clone().count(&self.db).await.map_err(internal)?;

        let models = page_and_sort(query, &filter)
            .all(&self.db)
            .await
            .map_err(internal)?;

        let data = self.materialize_many(models).await?;
        Ok(Paginated::new(data, total, filter.page, filter.limit))
    }

    async fn update(&self, id: i32, input: UpdateOrder) -> OrderResult<OrderDetails> {
        let txn = self.db.begin().await.map_err(internal)?;

        let result: Result<(), DbErr> = async {
            let mut header = <order::ActiveModel as ActiveModelTrait>::default();
            if let Some(user_id) = input.user_id {
                header.user_id = Set(user_id);
            }
            if let Some(status_id) = input.status_id {
                header.status_id = Set(status_id);
            }
            if let Some(total) = input.total {
                header.total = Set(total);
            }
            if let Some(payment_method_id) = input.payment_method_id {
                header.payment_method_id = Set(payment_method_id);
            }
            if let Some(address) = &input.address {
                header.address = Set(Some(address.clone()));
            }

            if header.is_changed() {
                header.updated_at = Set(chrono::Utc::now().into());
                order::Entity::update_many()
                    .set(header)
                    .filter(order::Column::Id.eq(id))
                    .exec(&txn)
                    .await?;
            }

            if let Some(products) = &input.products {
                if !products.is_empty() {
                    line_items::replace(&txn, id, products).await?;
                }
            }

            Ok(())
        }
        .await;

        match result {
            Ok(()) => {
                txn.commit().await.map_err(internal)?;
                tracing::info!(order_id = id, "Updated order");
                self.find_by_id(id).await?.ok_or(OrderError::NotFound(id))
            }
            Err(err) => {
                txn.rollback().await.map_err(internal)?;
                Err(map_write_err(err))
            }
        }
    }

    async fn delete(&self, id: i32) -> OrderResult<()> {
        let txn = self.db.begin().await.map_err(internal)?;

        let result: Result<(), DbErr> = async {
            order_product::Entity::delete_many()
                .filter(order_product::Column::OrderId.eq(id))
                .exec(&txn)
                .await?;

            order::Entity::delete_by_id(id).exec(&txn).await?;
            Ok(())
        }
        .await;

        match result {
            Ok(()) => {
                txn.commit().await.map_err(internal)?;
                tracing::info!(order_id = id, "Deleted order");
                Ok(())
            }
            Err(err) => {
                txn.rollback().await.map_err(internal)?;
                Err(internal(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use sea_orm::{DatabaseBackend, DbBackend, MockDatabase, MockExecResult, QueryTrait};

    use super::*;
    use crate::models::CreateOrderLineItem;

    fn header_model(id: i32) -> order::Model {
        let now = chrono::Utc::now().fixed_offset();
        order::Model {
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

    fn create_input() -> CreateOrder {
        CreateOrder {
            user_id: 1,
            status_id: 1,
            total: "349.97".parse().unwrap(),
            payment_method_id: 1,
            address: Some("742 Evergreen Terrace".into()),
            products: vec![
                CreateOrderLineItem {
                    product_id: 4,
                    quantity: 2,
                    price: "99.99".parse().unwrap(),
                },
                CreateOrderLineItem {
                    product_id: 5,
                    quantity: 1,
                    price: "149.99".parse().unwrap(),
                },
            ],
        }
    }

    #[tokio::test]
    async fn test_create_rolls_back_when_line_item_insert_fails() {
        // header insert succeeds, line-item insert fails; the transaction
        // must roll back and never commit
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![header_model(1)]])
            .append_query_results([Vec::<order_product::Model>::new()])
            .append_exec_errors([DbErr::Custom("line item insert failed".to_owned())])
            .into_connection();

        let repo = PgOrderRepository::new(db);
        let result = repo.create(create_input()).await;
        assert!(result.is_err());

        let PgOrderRepository { db } = repo;
        let flat = format!("{:?}", db.into_transaction_log());
        assert!(flat.contains("ROLLBACK"), "log: {}", flat);
        assert!(!flat.contains("COMMIT"), "log: {}", flat);
    }

    #[tokio::test]
    async fn test_delete_removes_line_items_before_header_in_one_transaction() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 2,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
            ])
            .into_connection();

        let repo = PgOrderRepository::new(db);
        repo.delete(42).await.unwrap();

        let PgOrderRepository { db } = repo;
        let flat = format!("{:?}", db.into_transaction_log());

        let items_pos = flat
            .find(r#"DELETE FROM "order_products""#)
            .expect("no line-item delete in log");
        let header_pos = flat
            .find(r#"DELETE FROM "orders""#)
            .expect("no header delete in log");
        assert!(items_pos < header_pos, "line items must go first: {}", flat);
        assert!(flat.contains("COMMIT"), "log: {}", flat);
    }

    #[test]
    fn test_list_query_applies_equality_filters() {
        let filter = OrderFilter {
            user_id: Some(3),
            status_id: Some(2),
            payment_method_id: Some(1),
            ..Default::default()
        };

        let sql = build_list_query(&filter).build(DbBackend::Postgres).to_string();
        assert!(sql.contains(r#""user_id" = 3"#), "sql was: {}", sql);
        assert!(sql.contains(r#""status_id" = 2"#), "sql was: {}", sql);
        assert!(sql.contains(r#""payment_method_id" = 1"#), "sql was: {}", sql);
    }

    #[test]
    fn test_list_query_applies_total_range_inclusively() {
        let filter = OrderFilter {
            min_total: Some(Decimal::new(10000, 2)),
            max_total: Some(Decimal::new(50000, 2)),
            ..Default::default()
        };

        let sql = build_list_query(&filter).build(DbBackend::Postgres).to_string();
        assert!(sql.contains(">="), "sql was: {}", sql);
        assert!(sql.contains("<="), "sql was: {}", sql);
    }

    #[test]
    fn test_list_query_address_is_case_insensitive_substring() {
        let filter = OrderFilter {
            address: Some("Evergreen".to_string()),
            ..Default::default()
        };

        let sql = build_list_query(&filter).build(DbBackend::Postgres).to_string();
        assert!(sql.contains(r#"ILIKE '%Evergreen%'"#), "sql was: {}", sql);
    }

    #[test]
    fn test_list_query_date_range_covers_whole_days() {
        let filter = OrderFilter {
            date_from: Some("2024-01-01".parse().unwrap()),
            date_to: Some("2024-12-31".parse().unwrap()),
            ..Default::default()
        };

        let sql = build_list_query(&filter).build(DbBackend::Postgres).to_string();
        assert!(sql.contains("2024-01-01 00:00:00"), "sql was: {}", sql);
        // inclusive upper bound: strictly before the next midnight
        assert!(sql.contains("2025-01-01 00:00:00"), "sql was: {}", sql);
    }

    #[test]
    fn test_pagination_offset_follows_the_page_law() {
        let filter = OrderFilter {
            page: 3,
            limit: 20,
            ..Default::default()
        };

        let sql = page_and_sort(build_list_query(&filter), &filter)
            .build(DbBackend::Postgres)
            .to_string();
        assert!(sql.contains("LIMIT 20"), "sql was: {}", sql);
        assert!(sql.contains("OFFSET 40"), "sql was: {}", sql);
    }

    #[test]
    fn test_default_sort_is_date_descending() {
        let filter = OrderFilter::default();

        let sql = page_and_sort(build_list_query(&filter), &filter)
            .build(DbBackend::Postgres)
            .to_string();
        assert!(
            sql.contains(r#"ORDER BY "orders"."date" DESC"#),
            "sql was: {}",
            sql
        );
    }

    #[test]
    fn test_sort_key_allow_list_maps_to_columns() {
        let filter = OrderFilter {
            sort_by: OrderSortBy::Total,
            sort_order: crate::models::SortOrder::Asc,
            ..Default::default()
        };

        let sql = page_and_sort(build_list_query(&filter), &filter)
            .build(DbBackend::Postgres)
            .to_string();
        assert!(
            sql.contains(r#"ORDER BY "orders"."total" ASC"#),
            "sql was: {}",
            sql
        );
    }
}
