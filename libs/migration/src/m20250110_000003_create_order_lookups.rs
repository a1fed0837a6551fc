use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(OrderStatus::Table)
                    .if_not_exists()
                    .col(pk_auto(OrderStatus::Id))
                    .col(string(OrderStatus::Identifier).unique_key())
                    .col(string(OrderStatus::Name))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PaymentMethods::Table)
                    .if_not_exists()
                    .col(pk_auto(PaymentMethods::Id))
                    .col(string(PaymentMethods::Identifier).unique_key())
                    .col(string(PaymentMethods::Name))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PaymentMethods::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(OrderStatus::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum OrderStatus {
    Table,
    Id,
    Identifier,
    Name,
}

#[derive(DeriveIden)]
pub enum PaymentMethods {
    Table,
    Id,
    Identifier,
    Name,
}
