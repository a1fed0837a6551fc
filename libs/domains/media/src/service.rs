use std::sync::Arc;

use crate::client::MediaStore;
use crate::error::{MediaError, MediaResult};
use crate::models::{UploadSource, UploadedImage};

/// Pass-through upload service: validates the file and forwards it to the
/// media collaborator.
#[derive(Clone)]
pub struct UploadService<M: MediaStore> {
    media: Arc<M>,
}

impl<M: MediaStore> UploadService<M> {
    pub fn new(media: M) -> Self {
        Self {
            media: Arc::new(media),
        }
    }

    pub async fn upload_image(&self, source: UploadSource) -> MediaResult<UploadedImage> {
        if !source.content_type.starts_with("image/") {
            return Err(MediaError::InvalidFile(
                "The file must be an image (jpg, png, gif, webp, ...)".to_string(),
            ));
        }

        if source.bytes.is_empty() {
            return Err(MediaError::InvalidFile("The file is empty".to_string()));
        }

        self.media.upload(source).await
    }

    pub async fn upload_images(
        &self,
        sources: Vec<UploadSource>,
    ) -> MediaResult<Vec<UploadedImage>> {
        if sources.is_empty() {
            return Err(MediaError::InvalidFile("No files provided".to_string()));
        }

        let mut uploaded = Vec::with_capacity(sources.len());
        for source in sources {
            uploaded.push(self.upload_image(source).await?);
        }

        Ok(uploaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockMediaStore;
    use crate::models::{ImageSizes, SizeVariant};

    fn variant(url: &str) -> SizeVariant {
        SizeVariant {
            width: 150,
            height: 150,
            url: url.to_string(),
        }
    }

    fn uploaded(public_id: &str) -> UploadedImage {
        UploadedImage {
            public_id: public_id.to_string(),
            url: format!("https://media/{}", public_id),
            width: 1024,
            height: 768,
            format: "png".to_string(),
            bytes: 2048,
            sizes: ImageSizes {
                small: variant("s"),
                medium: variant("m"),
                large: variant("l"),
                xlarge: variant("xl"),
            },
        }
    }

    #[tokio::test]
    async fn test_rejects_non_image_content_type() {
        let store = MockMediaStore::new();
        let service = UploadService::new(store);

        let result = service
            .upload_image(UploadSource {
                filename: "report.pdf".into(),
                content_type: "application/pdf".into(),
                bytes: vec![1, 2, 3],
            })
            .await;

        assert!(matches!(result, Err(MediaError::InvalidFile(_))));
    }

    #[tokio::test]
    async fn test_uploads_valid_image() {
        let mut store = MockMediaStore::new();
        store
            .expect_upload()
            .returning(|_| Ok(uploaded("abc123")));

        let service = UploadService::new(store);
        let result = service
            .upload_image(UploadSource {
                filename: "photo.png".into(),
                content_type: "image/png".into(),
                bytes: vec![1, 2, 3],
            })
            .await
            .unwrap();

        assert_eq!(result.public_id, "abc123");
    }

    #[tokio::test]
    async fn test_batch_rejects_empty_set() {
        let store = MockMediaStore::new();
        let service = UploadService::new(store);

        let result = service.upload_images(vec![]).await;
        assert!(matches!(result, Err(MediaError::InvalidFile(_))));
    }
}
