use async_trait::async_trait;
use serde::Deserialize;

use crate::config::MediaConfig;
use crate::error::{MediaError, MediaResult};
use crate::models::{ImageSizes, SizeVariant, UploadSource, UploadedImage};

/// Named variant dimensions the media pipeline renders for every upload.
const VARIANT_DIMENSIONS: [(&str, u32); 4] =
    [("small", 150), ("medium", 400), ("large", 800), ("xlarge", 1200)];

/// Collaborator interface to the external media service.
///
/// The service stores the original image under a stable public id and can
/// serve resized variants of it on demand.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaStore: Send + Sync {
    async fn upload(&self, source: UploadSource) -> MediaResult<UploadedImage>;
}

/// What the media service answers to an upload request.
#[derive(Debug, Deserialize)]
struct MediaUploadResponse {
    public_id: String,
    url: String,
    width: u32,
    height: u32,
    format: String,
    bytes: u64,
}

/// HTTP implementation of [`MediaStore`] using multipart uploads.
pub struct HttpMediaStore {
    http: reqwest::Client,
    config: MediaConfig,
}

impl HttpMediaStore {
    pub fn new(config: MediaConfig) -> MediaResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| MediaError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    fn variant_url(&self, public_id: &str, width: u32, height: u32) -> String {
        format!(
            "{}/v1/images/{}/{}x{}",
            self.config.base_url.trim_end_matches('/'),
            public_id,
            width,
            height
        )
    }

    fn variant(&self, public_id: &str, dim: u32) -> SizeVariant {
        SizeVariant {
            width: dim,
            height: dim,
            url: self.variant_url(public_id, dim, dim),
        }
    }

    fn build_sizes(&self, public_id: &str) -> ImageSizes {
        let [(_, small), (_, medium), (_, large), (_, xlarge)] = VARIANT_DIMENSIONS;

        ImageSizes {
            small: self.variant(public_id, small),
            medium: self.variant(public_id, medium),
            large: self.variant(public_id, large),
            xlarge: self.variant(public_id, xlarge),
        }
    }
}

#[async_trait]
impl MediaStore for HttpMediaStore {
    async fn upload(&self, source: UploadSource) -> MediaResult<UploadedImage> {
        let url = format!(
            "{}/v1/images",
            self.config.base_url.trim_end_matches('/')
        );

        let part = reqwest::multipart::Part::bytes(source.bytes)
            .file_name(source.filename.clone())
            .mime_str(&source.content_type)
            .map_err(|e| MediaError::InvalidFile(format!("Invalid content type: {}", e)))?;

        let form = reqwest::multipart::Form::new().part("file", part);

        let mut request = self.http.post(&url).multipart(form);
        if let Some(api_key) = &self.config.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| MediaError::Upstream(format!("Upload request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(MediaError::Upstream(format!(
                "Media service returned {}: {}",
                status, body
            )));
        }

        let uploaded: MediaUploadResponse = response
            .json()
            .await
            .map_err(|e| MediaError::Upstream(format!("Invalid media service response: {}", e)))?;

        tracing::info!(
            public_id = %uploaded.public_id,
            bytes = uploaded.bytes,
            "Uploaded image to media service"
        );

        let sizes = self.build_sizes(&uploaded.public_id);
        Ok(UploadedImage {
            public_id: uploaded.public_id,
            url: uploaded.url,
            width: uploaded.width,
            height: uploaded.height,
            format: uploaded.format,
            bytes: uploaded.bytes,
            sizes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_urls_follow_the_resize_scheme() {
        let store = HttpMediaStore::new(MediaConfig::new("https://media.example.com/")).unwrap();
        let sizes = store.build_sizes("abc123");

        assert_eq!(sizes.small.url, "https://media.example.com/v1/images/abc123/150x150");
        assert_eq!(sizes.xlarge.width, 1200);
    }
}
