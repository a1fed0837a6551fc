use axum::Router;

pub mod health;

use crate::state::AppState;

/// API routes without the `/api` prefix; the prefix is added by the router
/// bootstrap in axum-helpers.
///
/// Each domain router receives its own service wired to the shared pool, and
/// applies its own state, so the composed router is stateless.
pub fn routes(state: &AppState) -> eyre::Result<Router> {
    let db = &state.db;

    let brands = domain_brands::handlers::router(domain_brands::BrandService::new(
        domain_brands::PgBrandRepository::new(db.clone()),
    ));

    let categories = domain_categories::handlers::router(domain_categories::CategoryService::new(
        domain_categories::PgCategoryRepository::new(db.clone()),
    ));

    let products = domain_products::handlers::router(domain_products::ProductService::new(
        domain_products::PgProductRepository::new(db.clone()),
    ));

    let users = domain_users::handlers::router(domain_users::UserService::new(
        domain_users::PgUserRepository::new(db.clone()),
    ));

    let order_status = domain_order_status::handlers::router(
        domain_order_status::OrderStatusService::new(
            domain_order_status::PgOrderStatusRepository::new(db.clone()),
        ),
    );

    let payment_methods = domain_payment_methods::handlers::router(
        domain_payment_methods::PaymentMethodService::new(
            domain_payment_methods::PgPaymentMethodRepository::new(db.clone()),
        ),
    );

    let orders = domain_orders::handlers::router(domain_orders::OrderService::new(
        domain_orders::PgOrderRepository::new(db.clone()),
    ));

    let media_store = domain_media::HttpMediaStore::new(state.config.media.clone())
        .map_err(|e| eyre::eyre!("Failed to build media client: {}", e))?;
    let upload = domain_media::handlers::router(
        domain_media::UploadService::new(media_store),
        domain_media::PgSizeRegistry::new(db.clone()),
    );

    Ok(Router::new()
        .nest("/brands", brands)
        .nest("/categories", categories)
        .nest("/products", products)
        .nest("/users", users)
        .nest("/order-status", order_status)
        .nest("/payment-methods", payment_methods)
        .nest("/orders", orders)
        .nest("/upload", upload))
}

/// Router with the `/ready` endpoint doing a live database check.
pub fn ready_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
