use utoipa::OpenApi;

/// Aggregated OpenAPI document for the whole API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Catalog & Order Administration API",
        description = "CRUD backend for products, categories, brands, users and orders, \
                       with an image-upload pass-through to the media service."
    ),
    nest(
        (path = "/api/brands", api = domain_brands::handlers::ApiDoc),
        (path = "/api/categories", api = domain_categories::handlers::ApiDoc),
        (path = "/api/products", api = domain_products::handlers::ApiDoc),
        (path = "/api/users", api = domain_users::handlers::ApiDoc),
        (path = "/api/order-status", api = domain_order_status::handlers::ApiDoc),
        (path = "/api/payment-methods", api = domain_payment_methods::handlers::ApiDoc),
        (path = "/api/orders", api = domain_orders::handlers::ApiDoc),
        (path = "/api/upload", api = domain_media::handlers::ApiDoc),
    )
)]
pub struct ApiDoc;
