use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Brands::Table)
                    .if_not_exists()
                    .col(pk_auto(Brands::Id))
                    .col(string(Brands::Name))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Categories::Table)
                    .if_not_exists()
                    .col(pk_auto(Categories::Id))
                    .col(string(Categories::Name))
                    .col(string_null(Categories::Slug))
                    .col(string_null(Categories::Image))
                    .to_owned(),
            )
            .await?;

        // Registry of known image size variants ("150x150", "original", ...)
        manager
            .create_table(
                Table::create()
                    .table(SizeImages::Table)
                    .if_not_exists()
                    .col(pk_auto(SizeImages::Id))
                    .col(string(SizeImages::Size).unique_key())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(pk_auto(Products::Id))
                    .col(string(Products::Name))
                    .col(text_null(Products::Description))
                    .col(decimal_len(Products::Price, 10, 2))
                    .col(decimal_len_null(Products::OriginalPrice, 10, 2))
                    .col(decimal_len(Products::Rating, 2, 1).default(0))
                    .col(integer(Products::Reviews).default(0))
                    .col(boolean(Products::InStock).default(true))
                    .col(integer(Products::Stock).default(0))
                    .col(string_null(Products::Sku))
                    .col(integer(Products::CategoryId))
                    .col(integer(Products::BrandId))
                    .col(
                        timestamp_with_time_zone(Products::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Products::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_products_category_id")
                            .from(Products::Table, Products::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_products_brand_id")
                            .from(Products::Table, Products::BrandId)
                            .to(Brands::Table, Brands::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .check(Expr::col(Products::Price).gt(0))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_products_category_id")
                    .table(Products::Table)
                    .col(Products::CategoryId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_products_brand_id")
                    .table(Products::Table)
                    .col(Products::BrandId)
                    .to_owned(),
            )
            .await?;

        // Image rows are owned by their product/category: cascade on owner
        // delete, size_id is the deduplicated size key, not a foreign key.
        manager
            .create_table(
                Table::create()
                    .table(ProductImages::Table)
                    .if_not_exists()
                    .col(pk_auto(ProductImages::Id))
                    .col(integer(ProductImages::ProductId))
                    .col(string(ProductImages::Url))
                    .col(text(ProductImages::SizeId))
                    .col(text(ProductImages::PublicId))
                    .col(
                        timestamp_with_time_zone(ProductImages::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(ProductImages::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_product_images_product_id")
                            .from(ProductImages::Table, ProductImages::ProductId)
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_product_images_product_id")
                    .table(ProductImages::Table)
                    .col(ProductImages::ProductId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CategoryImages::Table)
                    .if_not_exists()
                    .col(pk_auto(CategoryImages::Id))
                    .col(integer(CategoryImages::CategoryId))
                    .col(string(CategoryImages::Url))
                    .col(text(CategoryImages::SizeId))
                    .col(text(CategoryImages::PublicId))
                    .col(
                        timestamp_with_time_zone(CategoryImages::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(CategoryImages::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_category_images_category_id")
                            .from(CategoryImages::Table, CategoryImages::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_category_images_category_id")
                    .table(CategoryImages::Table)
                    .col(CategoryImages::CategoryId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CategoryImages::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ProductImages::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SizeImages::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Categories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Brands::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Brands {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
pub enum Categories {
    Table,
    Id,
    Name,
    Slug,
    Image,
}

#[derive(DeriveIden)]
pub enum SizeImages {
    Table,
    Id,
    Size,
}

#[derive(DeriveIden)]
pub enum Products {
    Table,
    Id,
    Name,
    Description,
    Price,
    OriginalPrice,
    Rating,
    Reviews,
    InStock,
    Stock,
    Sku,
    CategoryId,
    BrandId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum ProductImages {
    Table,
    Id,
    ProductId,
    Url,
    SizeId,
    PublicId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum CategoryImages {
    Table,
    Id,
    CategoryId,
    Url,
    SizeId,
    PublicId,
    CreatedAt,
    UpdatedAt,
}
