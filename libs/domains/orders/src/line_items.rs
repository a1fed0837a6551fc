//! Line-item writer.
//!
//! Both operations run on whatever connection the caller supplies — in
//! practice always the orchestrator's open transaction — and never commit or
//! roll back themselves. `sub_total` is computed here from the unit price and
//! quantity; the value in the request, if any, is ignored.

use rust_decimal::Decimal;
use sea_orm::ActiveValue::Set;
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter};

use crate::entity::order_product;
use crate::models::CreateOrderLineItem;

/// Insert the supplied line items stamped with `order_id`.
pub async fn insert_all<C: ConnectionTrait>(
    conn: &C,
    order_id: i32,
    items: &[CreateOrderLineItem],
) -> Result<(), DbErr> {
    if items.is_empty() {
        return Ok(());
    }

    let rows = items.iter().map(|item| order_product::ActiveModel {
        product_id: Set(item.product_id),
        order_id: Set(order_id),
        quantity: Set(item.quantity),
        price: Set(item.price),
        sub_total: Set(item.price * Decimal::from(item.quantity)),
        ..Default::default()
    });

    order_product::Entity::insert_many(rows).exec(conn).await?;
    Ok(())
}

/// Replace the full line-item set of an order: delete everything, then insert
/// the supplied set. The result is exactly the supplied set — no partial
/// merge. An empty set leaves the order with zero line items, which is a
/// valid terminal state.
pub async fn replace<C: ConnectionTrait>(
    conn: &C,
    order_id: i32,
    items: &[CreateOrderLineItem],
) -> Result<(), DbErr> {
    order_product::Entity::delete_many()
        .filter(order_product::Column::OrderId.eq(order_id))
        .exec(conn)
        .await?;

    insert_all(conn, order_id, items).await
}

#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    use super::*;

    fn item(product_id: i32, price: &str, quantity: i32) -> CreateOrderLineItem {
        CreateOrderLineItem {
            product_id,
            quantity,
            price: price.parse().unwrap(),
        }
    }

    #[tokio::test]
    async fn test_replace_with_empty_set_only_deletes() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 3,
            }])
            .into_connection();

        replace(&db, 7, &[]).await.unwrap();

        let log = db.into_transaction_log();
        let flat = format!("{:?}", log);
        assert!(flat.contains(r#"DELETE FROM "order_products""#), "log: {}", flat);
        assert!(!flat.contains("INSERT"), "log: {}", flat);
    }

    #[tokio::test]
    async fn test_replace_deletes_then_inserts_with_computed_subtotals() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 2,
                    rows_affected: 2,
                },
            ])
            .append_query_results([vec![order_product::Model {
                id: 2,
                product_id: 5,
                order_id: 7,
                quantity: 1,
                price: "149.99".parse().unwrap(),
                sub_total: "149.99".parse().unwrap(),
            }]])
            .into_connection();

        let items = vec![item(4, "99.99", 2), item(5, "149.99", 1)];
        let _ = replace(&db, 7, &items).await;

        let log = db.into_transaction_log();
        let flat = format!("{:?}", log);

        let delete_pos = flat.find("DELETE FROM").expect("no delete in log");
        let insert_pos = flat.find("INSERT INTO").expect("no insert in log");
        assert!(delete_pos < insert_pos, "delete must precede insert: {}", flat);

        // sub_total is derived: 99.99 * 2 = 199.98
        assert!(flat.contains("199.98"), "log: {}", flat);
        assert!(flat.contains("149.99"), "log: {}", flat);
    }
}
