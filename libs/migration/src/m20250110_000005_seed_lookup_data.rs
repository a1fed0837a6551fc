use sea_orm_migration::prelude::*;

use super::m20250110_000002_create_catalog::SizeImages;
use super::m20250110_000003_create_order_lookups::{OrderStatus, PaymentMethods};

#[derive(DeriveMigrationName)]
pub struct Migration;

const IMAGE_SIZES: [&str; 5] = ["150x150", "400x400", "800x800", "1200x1200", "original"];

const ORDER_STATUSES: [(&str, &str); 5] = [
    ("pending", "Pending"),
    ("processing", "Processing"),
    ("shipped", "Shipped"),
    ("delivered", "Delivered"),
    ("cancelled", "Cancelled"),
];

const PAYMENT_METHODS: [(&str, &str); 4] = [
    ("cash", "Cash"),
    ("credit_card", "Credit card"),
    ("debit_card", "Debit card"),
    ("transfer", "Bank transfer"),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for size in IMAGE_SIZES {
            manager
                .exec_stmt(
                    Query::insert()
                        .into_table(SizeImages::Table)
                        .columns([SizeImages::Size])
                        .values_panic([size.into()])
                        .to_owned(),
                )
                .await?;
        }

        for (identifier, name) in ORDER_STATUSES {
            manager
                .exec_stmt(
                    Query::insert()
                        .into_table(OrderStatus::Table)
                        .columns([OrderStatus::Identifier, OrderStatus::Name])
                        .values_panic([identifier.into(), name.into()])
                        .to_owned(),
                )
                .await?;
        }

        for (identifier, name) in PAYMENT_METHODS {
            manager
                .exec_stmt(
                    Query::insert()
                        .into_table(PaymentMethods::Table)
                        .columns([PaymentMethods::Identifier, PaymentMethods::Name])
                        .values_panic([identifier.into(), name.into()])
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .exec_stmt(Query::delete().from_table(PaymentMethods::Table).to_owned())
            .await?;
        manager
            .exec_stmt(Query::delete().from_table(OrderStatus::Table).to_owned())
            .await?;
        manager
            .exec_stmt(Query::delete().from_table(SizeImages::Table).to_owned())
            .await?;
        Ok(())
    }
}
