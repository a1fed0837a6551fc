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

use crate::error::PaymentMethodResult;
use crate::models::{CreatePaymentMethod, PaymentMethod, UpdatePaymentMethod};
use crate::repository::PaymentMethodRepository;
use crate::service::PaymentMethodService;

const TAG: &str = "payment-methods";

#[derive(OpenApi)]
#[openapi(
    paths(list_methods, create_method, get_method, update_method, delete_method),
    components(
        schemas(PaymentMethod, CreatePaymentMethod, UpdatePaymentMethod),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags((name = TAG, description = "Payment method lookup endpoints"))
)]
pub struct ApiDoc;

pub fn router<R: PaymentMethodRepository + 'static>(service: PaymentMethodService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_methods).post(create_method))
        .route(
            "/{id}",
            get(get_method).patch(update_method).delete(delete_method),
        )
        .with_state(shared_service)
}

/// List all payment methods
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "All payment methods", body = Vec<PaymentMethod>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_methods<R: PaymentMethodRepository>(
    State(service): State<Arc<PaymentMethodService<R>>>,
) -> PaymentMethodResult<Json<Vec<PaymentMethod>>> {
    let methods = service.list_methods().await?;
    Ok(Json(methods))
}

/// Create a payment method
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreatePaymentMethod,
    responses(
        (status = 201, description = "Payment method created", body = PaymentMethod),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_method<R: PaymentMethodRepository>(
    State(service): State<Arc<PaymentMethodService<R>>>,
    ValidatedJson(input): ValidatedJson<CreatePaymentMethod>,
) -> PaymentMethodResult<impl IntoResponse> {
    let method = service.create_method(input).await?;
    Ok((StatusCode::CREATED, Json(method)))
}

/// Get a payment method by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(("id" = i32, Path, description = "Payment method id")),
    responses(
        (status = 200, description = "Payment method found", body = PaymentMethod),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_method<R: PaymentMethodRepository>(
    State(service): State<Arc<PaymentMethodService<R>>>,
    IdPath(id): IdPath,
) -> PaymentMethodResult<Json<PaymentMethod>> {
    let method = service.get_method(id).await?;
    Ok(Json(method))
}

/// Update a payment method
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = TAG,
    params(("id" = i32, Path, description = "Payment method id")),
    request_body = UpdatePaymentMethod,
    responses(
        (status = 200, description = "Payment method updated", body = PaymentMethod),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_method<R: PaymentMethodRepository>(
    State(service): State<Arc<PaymentMethodService<R>>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdatePaymentMethod>,
) -> PaymentMethodResult<Json<PaymentMethod>> {
    let method = service.update_method(id, input).await?;
    Ok(Json(method))
}

/// Delete a payment method
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(("id" = i32, Path, description = "Payment method id")),
    responses(
        (status = 200, description = "Payment method deleted"),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_method<R: PaymentMethodRepository>(
    State(service): State<Arc<PaymentMethodService<R>>>,
    IdPath(id): IdPath,
) -> PaymentMethodResult<Json<serde_json::Value>> {
    service.delete_method(id).await?;
    Ok(Json(json!({
        "message": format!("Payment method with id {} deleted successfully", id)
    })))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use super::*;
    use crate::repository::MockPaymentMethodRepository;

    #[tokio::test]
    async fn test_delete_referenced_method_returns_409() {
        let mut repo = MockPaymentMethodRepository::new();
        repo.expect_delete().returning(|_| {
            Err(crate::error::PaymentMethodError::HasDependents(
                "Cannot delete payment method: it has associated orders.".into(),
            ))
        });

        let app = router(PaymentMethodService::new(repo));
        let request = Request::builder()
            .method("DELETE")
            .uri("/1")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
