use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::errors::responses::{
    BadRequestValidationResponse, ConflictResponse, InternalServerErrorResponse, NotFoundResponse,
};
use axum_helpers::{IdPath, Paginated, ValidatedJson};
use utoipa::OpenApi;

use crate::error::OrderResult;
use crate::models::{
    CreateOrder, CreateOrderLineItem, DeleteConfirmation, LineItemDetails, OrderDetails,
    OrderFilter, PaymentMethodSummary, ProductSummary, StatusSummary, UpdateOrder, UserSummary,
};
use crate::repository::OrderRepository;
use crate::service::OrderService;

const TAG: &str = "orders";

#[derive(OpenApi)]
#[openapi(
    paths(
        list_orders,
        create_order,
        list_user_orders,
        get_order,
        update_order,
        delete_order,
    ),
    components(
        schemas(
            OrderDetails,
            LineItemDetails,
            CreateOrder,
            CreateOrderLineItem,
            UpdateOrder,
            DeleteConfirmation,
            UserSummary,
            StatusSummary,
            PaymentMethodSummary,
            ProductSummary,
            Paginated<OrderDetails>
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags((name = TAG, description = "Order lifecycle endpoints"))
)]
pub struct ApiDoc;

pub fn router<R: OrderRepository + 'static>(service: OrderService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_orders).post(create_order))
        .route("/user/{user_id}", get(list_user_orders))
        .route(
            "/{id}",
            get(get_order).patch(update_order).delete(delete_order),
        )
        .with_state(shared_service)
}

/// List orders with filters, sorting and pagination
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(OrderFilter),
    responses(
        (status = 200, description = "Paginated orders with associations", body = Paginated<OrderDetails>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_orders<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
    Query(filter): Query<OrderFilter>,
) -> OrderResult<Json<Paginated<OrderDetails>>> {
    let page = service.list_orders(filter).await?;
    Ok(Json(page))
}

/// Create an order together with its line items
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateOrder,
    responses(
        (status = 201, description = "Order created", body = OrderDetails),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_order<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateOrder>,
) -> OrderResult<impl IntoResponse> {
    let order = service.create_order(input).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// List one user's orders
#[utoipa::path(
    get,
    path = "/user/{user_id}",
    tag = TAG,
    params(
        ("user_id" = i32, Path, description = "User id"),
        OrderFilter
    ),
    responses(
        (status = 200, description = "Paginated orders for the user", body = Paginated<OrderDetails>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_user_orders<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
    Path(user_id): Path<i32>,
    Query(filter): Query<OrderFilter>,
) -> OrderResult<Json<Paginated<OrderDetails>>> {
    let page = service.list_orders_for_user(user_id, filter).await?;
    Ok(Json(page))
}

/// Get a materialized order by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(("id" = i32, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order found", body = OrderDetails),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_order<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
    IdPath(id): IdPath,
) -> OrderResult<Json<OrderDetails>> {
    let order = service.get_order(id).await?;
    Ok(Json(order))
}

/// Partially update an order; a supplied product list replaces all line items
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = TAG,
    params(("id" = i32, Path, description = "Order id")),
    request_body = UpdateOrder,
    responses(
        (status = 200, description = "Order updated", body = OrderDetails),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_order<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateOrder>,
) -> OrderResult<Json<OrderDetails>> {
    let order = service.update_order(id, input).await?;
    Ok(Json(order))
}

/// Delete an order and its line items
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(("id" = i32, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order deleted", body = DeleteConfirmation),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_order<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
    IdPath(id): IdPath,
) -> OrderResult<Json<DeleteConfirmation>> {
    let confirmation = service.remove_order(id).await?;
    Ok(Json(confirmation))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::json;
    use tower::ServiceExt;

    use super::*;
    use crate::repository::MockOrderRepository;

    fn details(id: i32) -> OrderDetails {
        let now = chrono::Utc::now();
        OrderDetails {
            id,
            user_id: 1,
            status_id: 1,
            total: "349.97".parse().unwrap(),
            date: now,
            payment_method_id: 1,
            address: None,
            created_at: now,
            updated_at: now,
            user: Some(UserSummary {
                id: 1,
                email: "ana@example.com".into(),
                full_name: Some("Ana".into()),
                phone: None,
            }),
            status: Some(StatusSummary {
                id: 1,
                identifier: "pending".into(),
                name: "Pending".into(),
            }),
            payment_method: Some(PaymentMethodSummary {
                id: 1,
                identifier: "cash".into(),
                name: "Cash".into(),
            }),
            products: vec![LineItemDetails {
                id: 1,
                product_id: 4,
                quantity: 2,
                price: "99.99".parse().unwrap(),
                sub_total: "199.98".parse().unwrap(),
                product: Some(ProductSummary {
                    id: 4,
                    name: "Widget".into(),
                    sku: Some("W-4".into()),
                    price: "99.99".parse().unwrap(),
                }),
            }],
        }
    }

    fn app(repo: MockOrderRepository) -> Router {
        router(OrderService::new(repo))
    }

    fn create_body(total: &str) -> String {
        json!({
            "user_id": 1,
            "status_id": 1,
            "total": total,
            "payment_method_id": 1,
            "products": [
                {"product_id": 4, "quantity": 2, "price": "99.99"},
                {"product_id": 5, "quantity": 1, "price": "149.99"}
            ]
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_create_order_returns_201_with_associations() {
        let mut repo = MockOrderRepository::new();
        repo.expect_create().returning(|_| Ok(details(1)));

        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(create_body("349.97")))
            .unwrap();

        let response = app(repo).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["user"]["email"], "ana@example.com");
        assert_eq!(body["products"][0]["sub_total"], "199.98");
    }

    #[tokio::test]
    async fn test_create_order_with_total_mismatch_returns_400() {
        // repository untouched: any call would panic
        let repo = MockOrderRepository::new();

        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(create_body("350.50")))
            .unwrap();

        let response = app(repo).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let message = body["message"].as_str().unwrap();
        assert!(message.contains("349.97"), "message: {}", message);
        assert!(message.contains("350.50"), "message: {}", message);
    }

    #[tokio::test]
    async fn test_create_order_without_products_returns_400() {
        let repo = MockOrderRepository::new();

        let body = json!({
            "user_id": 1,
            "status_id": 1,
            "total": "10.00",
            "payment_method_id": 1,
            "products": []
        });

        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = app(repo).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_missing_order_returns_404() {
        let mut repo = MockOrderRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let request = Request::builder().uri("/42").body(Body::empty()).unwrap();

        let response = app(repo).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_order_returns_confirmation() {
        let mut repo = MockOrderRepository::new();
        repo.expect_find_header().returning(|id| {
            let mut d = details(id);
            d.products.clear();
            Ok(Some(crate::models::Order {
                id: d.id,
                user_id: d.user_id,
                status_id: d.status_id,
                total: d.total,
                date: d.date,
                payment_method_id: d.payment_method_id,
                address: d.address,
                created_at: d.created_at,
                updated_at: d.updated_at,
            }))
        });
        repo.expect_delete().returning(|_| Ok(()));

        let request = Request::builder()
            .method("DELETE")
            .uri("/7")
            .body(Body::empty())
            .unwrap();

        let response = app(repo).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(body["message"].as_str().unwrap().contains('7'));
    }

    #[tokio::test]
    async fn test_list_user_orders_pins_the_path_user() {
        let mut repo = MockOrderRepository::new();
        repo.expect_list()
            .withf(|filter| filter.user_id == Some(5))
            .returning(|filter| Ok(Paginated::new(vec![], 0, filter.page, filter.limit)));

        let request = Request::builder()
            .uri("/user/5")
            .body(Body::empty())
            .unwrap();

        let response = app(repo).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_list_with_pagination_envelope() {
        let mut repo = MockOrderRepository::new();
        repo.expect_list()
            .returning(|filter| Ok(Paginated::new(vec![], 45, filter.page, filter.limit)));

        let request = Request::builder()
            .uri("/?page=4&limit=20")
            .body(Body::empty())
            .unwrap();

        let response = app(repo).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["total"], 45);
        assert_eq!(body["total_pages"], 3);
        assert_eq!(body["data"].as_array().unwrap().len(), 0);
    }
}
