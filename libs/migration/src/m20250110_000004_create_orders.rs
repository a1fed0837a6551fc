use sea_orm_migration::{prelude::*, schema::*};

use super::m20250110_000001_create_users::Users;
use super::m20250110_000002_create_catalog::Products;
use super::m20250110_000003_create_order_lookups::{OrderStatus, PaymentMethods};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Every non-owning reference is RESTRICT: deleting a user, status or
        // payment method that an order still points at must fail at the store
        // so the conflict guard can surface it.
        manager
            .create_table(
                Table::create()
                    .table(Orders::Table)
                    .if_not_exists()
                    .col(pk_auto(Orders::Id))
                    .col(integer(Orders::UserId))
                    .col(integer(Orders::StatusId))
                    .col(decimal_len(Orders::Total, 10, 2))
                    .col(
                        timestamp_with_time_zone(Orders::Date)
                            .default(Expr::current_timestamp()),
                    )
                    .col(integer(Orders::PaymentMethodId))
                    .col(string_null(Orders::Address))
                    .col(
                        timestamp_with_time_zone(Orders::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Orders::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_orders_user_id")
                            .from(Orders::Table, Orders::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_orders_status_id")
                            .from(Orders::Table, Orders::StatusId)
                            .to(OrderStatus::Table, OrderStatus::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_orders_payment_method_id")
                            .from(Orders::Table, Orders::PaymentMethodId)
                            .to(PaymentMethods::Table, PaymentMethods::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .check(Expr::col(Orders::Total).gt(0))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_orders_user_id")
                    .table(Orders::Table)
                    .col(Orders::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_orders_status_id")
                    .table(Orders::Table)
                    .col(Orders::StatusId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_orders_date")
                    .table(Orders::Table)
                    .col(Orders::Date)
                    .to_owned(),
            )
            .await?;

        // Line items: order_id is RESTRICT rather than CASCADE so an order
        // header can only disappear through the orchestrated delete, which
        // removes the items first inside the same transaction.
        manager
            .create_table(
                Table::create()
                    .table(OrderProducts::Table)
                    .if_not_exists()
                    .col(pk_auto(OrderProducts::Id))
                    .col(integer(OrderProducts::ProductId))
                    .col(integer(OrderProducts::OrderId))
                    .col(integer(OrderProducts::Quantity))
                    .col(decimal_len(OrderProducts::Price, 10, 2))
                    .col(decimal_len(OrderProducts::SubTotal, 10, 2))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_products_product_id")
                            .from(OrderProducts::Table, OrderProducts::ProductId)
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_products_order_id")
                            .from(OrderProducts::Table, OrderProducts::OrderId)
                            .to(Orders::Table, Orders::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .check(Expr::col(OrderProducts::Quantity).gte(1))
                    .check(Expr::col(OrderProducts::Price).gt(0))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_order_products_order_id")
                    .table(OrderProducts::Table)
                    .col(OrderProducts::OrderId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_order_products_product_id")
                    .table(OrderProducts::Table)
                    .col(OrderProducts::ProductId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OrderProducts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Orders::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Orders {
    Table,
    Id,
    UserId,
    StatusId,
    Total,
    Date,
    PaymentMethodId,
    Address,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum OrderProducts {
    Table,
    Id,
    ProductId,
    OrderId,
    Quantity,
    Price,
    SubTotal,
}
