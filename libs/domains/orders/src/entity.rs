/// Sea-ORM entity for the `orders` table (the order header)
pub mod order {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "orders")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub user_id: i32,
        pub status_id: i32,
        #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
        pub total: Decimal,
        pub date: DateTimeWithTimeZone,
        pub payment_method_id: i32,
        pub address: Option<String>,
        pub created_at: DateTimeWithTimeZone,
        pub updated_at: DateTimeWithTimeZone,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "domain_users::entity::Entity",
            from = "Column::UserId",
            to = "domain_users::entity::Column::Id"
        )]
        User,
        #[sea_orm(
            belongs_to = "domain_order_status::entity::Entity",
            from = "Column::StatusId",
            to = "domain_order_status::entity::Column::Id"
        )]
        Status,
        #[sea_orm(
            belongs_to = "domain_payment_methods::entity::Entity",
            from = "Column::PaymentMethodId",
            to = "domain_payment_methods::entity::Column::Id"
        )]
        PaymentMethod,
        #[sea_orm(has_many = "super::order_product::Entity")]
        OrderProduct,
    }

    impl Related<domain_users::entity::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::User.def()
        }
    }

    impl Related<domain_order_status::entity::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Status.def()
        }
    }

    impl Related<domain_payment_methods::entity::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::PaymentMethod.def()
        }
    }

    impl Related<super::order_product::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::OrderProduct.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Sea-ORM entity for the `order_products` table (line items).
///
/// `price` is the unit price captured at order time, independent of the
/// product's current price; `sub_total` always equals `price * quantity`.
pub mod order_product {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "order_products")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub product_id: i32,
        pub order_id: i32,
        pub quantity: i32,
        #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
        pub price: Decimal,
        #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
        pub sub_total: Decimal,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::order::Entity",
            from = "Column::OrderId",
            to = "super::order::Column::Id"
        )]
        Order,
        #[sea_orm(
            belongs_to = "domain_products::entity::product::Entity",
            from = "Column::ProductId",
            to = "domain_products::entity::product::Column::Id"
        )]
        Product,
    }

    impl Related<super::order::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Order.def()
        }
    }

    impl Related<domain_products::entity::product::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Product.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}
