/// Sea-ORM entity for the `products` table
pub mod product {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "products")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub name: String,
        #[sea_orm(column_type = "Text", nullable)]
        pub description: Option<String>,
        #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
        pub price: Decimal,
        #[sea_orm(column_type = "Decimal(Some((10, 2)))", nullable)]
        pub original_price: Option<Decimal>,
        #[sea_orm(column_type = "Decimal(Some((2, 1)))")]
        pub rating: Decimal,
        pub reviews: i32,
        pub in_stock: bool,
        pub stock: i32,
        pub sku: Option<String>,
        pub category_id: i32,
        pub brand_id: i32,
        pub created_at: DateTimeWithTimeZone,
        pub updated_at: DateTimeWithTimeZone,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "domain_categories::entity::category::Entity",
            from = "Column::CategoryId",
            to = "domain_categories::entity::category::Column::Id"
        )]
        Category,
        #[sea_orm(
            belongs_to = "domain_brands::entity::Entity",
            from = "Column::BrandId",
            to = "domain_brands::entity::Column::Id"
        )]
        Brand,
        #[sea_orm(has_many = "super::product_image::Entity")]
        ProductImage,
    }

    impl Related<domain_categories::entity::category::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Category.def()
        }
    }

    impl Related<domain_brands::entity::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Brand.def()
        }
    }

    impl Related<super::product_image::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::ProductImage.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Sea-ORM entity for the `product_images` table.
///
/// `size_id` is the deduplicated size key, not a foreign key into the size
/// registry.
pub mod product_image {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "product_images")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub product_id: i32,
        pub url: String,
        #[sea_orm(column_type = "Text")]
        pub size_id: String,
        #[sea_orm(column_type = "Text")]
        pub public_id: String,
        pub created_at: DateTimeWithTimeZone,
        pub updated_at: DateTimeWithTimeZone,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::product::Entity",
            from = "Column::ProductId",
            to = "super::product::Column::Id",
            on_delete = "Cascade"
        )]
        Product,
    }

    impl Related<super::product::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Product.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}
