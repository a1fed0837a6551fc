use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::errors::responses::{
    BadRequestValidationResponse, ConflictResponse, InternalServerErrorResponse, NotFoundResponse,
};
use axum_helpers::{IdPath, ValidatedJson};
use serde_json::json;
use utoipa::OpenApi;

use crate::error::OrderStatusResult;
use crate::models::{CreateOrderStatus, OrderStatus, UpdateOrderStatus};
use crate::repository::OrderStatusRepository;
use crate::service::OrderStatusService;

const TAG: &str = "order-status";

#[derive(OpenApi)]
#[openapi(
    paths(list_statuses, create_status, get_status, update_status, delete_status),
    components(
        schemas(OrderStatus, CreateOrderStatus, UpdateOrderStatus),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags((name = TAG, description = "Order status lookup endpoints"))
)]
pub struct ApiDoc;

pub fn router<R: OrderStatusRepository + 'static>(service: OrderStatusService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_statuses).post(create_status))
        .route(
            "/{id}",
            get(get_status).patch(update_status).delete(delete_status),
        )
        .with_state(shared_service)
}

/// List all order statuses
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "All order statuses", body = Vec<OrderStatus>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_statuses<R: OrderStatusRepository>(
    State(service): State<Arc<OrderStatusService<R>>>,
) -> OrderStatusResult<Json<Vec<OrderStatus>>> {
    let statuses = service.list_statuses().await?;
    Ok(Json(statuses))
}

/// Create an order status
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateOrderStatus,
    responses(
        (status = 201, description = "Order status created", body = OrderStatus),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_status<R: OrderStatusRepository>(
    State(service): State<Arc<OrderStatusService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateOrderStatus>,
) -> OrderStatusResult<impl IntoResponse> {
    let status = service.create_status(input).await?;
    Ok((StatusCode::CREATED, Json(status)))
}

/// Get an order status by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(("id" = i32, Path, description = "Order status id")),
    responses(
        (status = 200, description = "Order status found", body = OrderStatus),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_status<R: OrderStatusRepository>(
    State(service): State<Arc<OrderStatusService<R>>>,
    IdPath(id): IdPath,
) -> OrderStatusResult<Json<OrderStatus>> {
    let status = service.get_status(id).await?;
    Ok(Json(status))
}

/// Update an order status
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = TAG,
    params(("id" = i32, Path, description = "Order status id")),
    request_body = UpdateOrderStatus,
    responses(
        (status = 200, description = "Order status updated", body = OrderStatus),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_status<R: OrderStatusRepository>(
    State(service): State<Arc<OrderStatusService<R>>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateOrderStatus>,
) -> OrderStatusResult<Json<OrderStatus>> {
    let status = service.update_status(id, input).await?;
    Ok(Json(status))
}

/// Delete an order status
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(("id" = i32, Path, description = "Order status id")),
    responses(
        (status = 200, description = "Order status deleted"),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_status<R: OrderStatusRepository>(
    State(service): State<Arc<OrderStatusService<R>>>,
    IdPath(id): IdPath,
) -> OrderStatusResult<Json<serde_json::Value>> {
    service.delete_status(id).await?;
    Ok(Json(json!({
        "message": format!("Order status with id {} deleted successfully", id)
    })))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use super::*;
    use crate::repository::MockOrderStatusRepository;

    #[tokio::test]
    async fn test_delete_referenced_status_returns_409() {
        let mut repo = MockOrderStatusRepository::new();
        repo.expect_delete().returning(|_| {
            Err(crate::error::OrderStatusError::HasDependents(
                "Cannot delete order status: it has associated orders.".into(),
            ))
        });

        let app = router(OrderStatusService::new(repo));
        let request = Request::builder()
            .method("DELETE")
            .uri("/1")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_list_statuses_returns_seeded_rows() {
        let mut repo = MockOrderStatusRepository::new();
        repo.expect_list().returning(|| {
            Ok(vec![OrderStatus {
                id: 1,
                identifier: "pending".into(),
                name: "Pending".into(),
            }])
        });

        let app = router(OrderStatusService::new(repo));
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
