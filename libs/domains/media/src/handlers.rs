use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Multipart, State},
    routing::{get, post},
};
use axum_helpers::errors::responses::{
    BadRequestValidationResponse, InternalServerErrorResponse,
};
use utoipa::OpenApi;

use crate::client::MediaStore;
use crate::error::{MediaError, MediaResult};
use crate::models::{SizeImage, UploadSource, UploadedImage};
use crate::repository::SizeRegistry;
use crate::service::UploadService;

const TAG: &str = "upload";

#[derive(OpenApi)]
#[openapi(
    paths(upload_image, upload_images, list_sizes),
    components(
        schemas(UploadedImage, SizeImage),
        responses(BadRequestValidationResponse, InternalServerErrorResponse)
    ),
    tags((name = TAG, description = "Image upload pass-through endpoints"))
)]
pub struct ApiDoc;

struct UploadState<M: MediaStore, S: SizeRegistry> {
    service: UploadService<M>,
    sizes: S,
}

pub fn router<M, S>(service: UploadService<M>, sizes: S) -> Router
where
    M: MediaStore + 'static,
    S: SizeRegistry + 'static,
{
    let state = Arc::new(UploadState { service, sizes });

    Router::new()
        .route("/image", post(upload_image))
        .route("/images", post(upload_images))
        .route("/sizes", get(list_sizes))
        .with_state(state)
}

async fn collect_sources(mut multipart: Multipart) -> MediaResult<Vec<UploadSource>> {
    let mut sources = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| MediaError::InvalidFile(format!("Invalid multipart body: {}", e)))?
    {
        let filename = field.file_name().unwrap_or("upload").to_string();
        let content_type = field.content_type().unwrap_or("").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| MediaError::InvalidFile(format!("Failed to read file: {}", e)))?
            .to_vec();

        sources.push(UploadSource {
            filename,
            content_type,
            bytes,
        });
    }

    Ok(sources)
}

/// Upload a single image
#[utoipa::path(
    post,
    path = "/image",
    tag = TAG,
    request_body(content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Image uploaded", body = UploadedImage),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn upload_image<M: MediaStore, S: SizeRegistry>(
    State(state): State<Arc<UploadState<M, S>>>,
    multipart: Multipart,
) -> MediaResult<Json<UploadedImage>> {
    let mut sources = collect_sources(multipart).await?;

    let source = sources
        .pop()
        .ok_or_else(|| MediaError::InvalidFile("No file provided".to_string()))?;

    let uploaded = state.service.upload_image(source).await?;
    Ok(Json(uploaded))
}

/// Upload a batch of images
#[utoipa::path(
    post,
    path = "/images",
    tag = TAG,
    request_body(content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Images uploaded", body = Vec<UploadedImage>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn upload_images<M: MediaStore, S: SizeRegistry>(
    State(state): State<Arc<UploadState<M, S>>>,
    multipart: Multipart,
) -> MediaResult<Json<Vec<UploadedImage>>> {
    let sources = collect_sources(multipart).await?;
    let uploaded = state.service.upload_images(sources).await?;
    Ok(Json(uploaded))
}

/// List the registered image sizes
#[utoipa::path(
    get,
    path = "/sizes",
    tag = TAG,
    responses(
        (status = 200, description = "Registered image sizes", body = Vec<SizeImage>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_sizes<M: MediaStore, S: SizeRegistry>(
    State(state): State<Arc<UploadState<M, S>>>,
) -> MediaResult<Json<Vec<SizeImage>>> {
    let sizes = state.sizes.list().await?;
    Ok(Json(sizes))
}
