use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::errors::responses::{
    BadRequestValidationResponse, ConflictResponse, InternalServerErrorResponse, NotFoundResponse,
};
use axum_helpers::{IdPath, Paginated, ValidatedJson};
use serde_json::json;
use utoipa::OpenApi;

use crate::error::BrandResult;
use crate::models::{Brand, BrandFilter, CreateBrand, UpdateBrand};
use crate::repository::BrandRepository;
use crate::service::BrandService;

const TAG: &str = "brands";

#[derive(OpenApi)]
#[openapi(
    paths(list_brands, create_brand, get_brand, update_brand, delete_brand),
    components(
        schemas(Brand, CreateBrand, UpdateBrand, Paginated<Brand>),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags((name = TAG, description = "Brand management endpoints"))
)]
pub struct ApiDoc;

/// Create the brand router with all HTTP endpoints
pub fn router<R: BrandRepository + 'static>(service: BrandService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_brands).post(create_brand))
        .route(
            "/{id}",
            get(get_brand).patch(update_brand).delete(delete_brand),
        )
        .with_state(shared_service)
}

/// List brands with optional filters
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(BrandFilter),
    responses(
        (status = 200, description = "Paginated brands", body = Paginated<Brand>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_brands<R: BrandRepository>(
    State(service): State<Arc<BrandService<R>>>,
    Query(filter): Query<BrandFilter>,
) -> BrandResult<Json<Paginated<Brand>>> {
    let page = service.list_brands(filter).await?;
    Ok(Json(page))
}

/// Create a new brand
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateBrand,
    responses(
        (status = 201, description = "Brand created", body = Brand),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_brand<R: BrandRepository>(
    State(service): State<Arc<BrandService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateBrand>,
) -> BrandResult<impl IntoResponse> {
    let brand = service.create_brand(input).await?;
    Ok((StatusCode::CREATED, Json(brand)))
}

/// Get a brand by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(("id" = i32, Path, description = "Brand id")),
    responses(
        (status = 200, description = "Brand found", body = Brand),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_brand<R: BrandRepository>(
    State(service): State<Arc<BrandService<R>>>,
    IdPath(id): IdPath,
) -> BrandResult<Json<Brand>> {
    let brand = service.get_brand(id).await?;
    Ok(Json(brand))
}

/// Update a brand
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = TAG,
    params(("id" = i32, Path, description = "Brand id")),
    request_body = UpdateBrand,
    responses(
        (status = 200, description = "Brand updated", body = Brand),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_brand<R: BrandRepository>(
    State(service): State<Arc<BrandService<R>>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateBrand>,
) -> BrandResult<Json<Brand>> {
    let brand = service.update_brand(id, input).await?;
    Ok(Json(brand))
}

/// Delete a brand
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(("id" = i32, Path, description = "Brand id")),
    responses(
        (status = 200, description = "Brand deleted"),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_brand<R: BrandRepository>(
    State(service): State<Arc<BrandService<R>>>,
    IdPath(id): IdPath,
) -> BrandResult<Json<serde_json::Value>> {
    service.delete_brand(id).await?;
    Ok(Json(json!({
        "message": format!("Brand with id {} deleted successfully", id)
    })))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use super::*;
    use crate::repository::MockBrandRepository;

    fn app(repo: MockBrandRepository) -> Router {
        router(BrandService::new(repo))
    }

    #[tokio::test]
    async fn test_create_brand_returns_201() {
        let mut repo = MockBrandRepository::new();
        repo.expect_create().returning(|input| {
            Ok(Brand {
                id: 1,
                name: input.name,
            })
        });

        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"name":"Acme"}"#))
            .unwrap();

        let response = app(repo).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_create_brand_rejects_empty_name() {
        let repo = MockBrandRepository::new();

        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"name":""}"#))
            .unwrap();

        let response = app(repo).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_brand_missing_returns_404() {
        let mut repo = MockBrandRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let request = Request::builder()
            .uri("/42")
            .body(Body::empty())
            .unwrap();

        let response = app(repo).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_brand_with_products_returns_409() {
        let mut repo = MockBrandRepository::new();
        repo.expect_delete().returning(|_| {
            Err(crate::error::BrandError::HasDependents(
                "Cannot delete brand: it has associated products".into(),
            ))
        });

        let request = Request::builder()
            .method("DELETE")
            .uri("/3")
            .body(Body::empty())
            .unwrap();

        let response = app(repo).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_invalid_id_returns_400() {
        let repo = MockBrandRepository::new();

        let request = Request::builder()
            .uri("/zero")
            .body(Body::empty())
            .unwrap();

        let response = app(repo).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
