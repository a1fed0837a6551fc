use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A raw file handed to the upload endpoint.
#[derive(Debug, Clone)]
pub struct UploadSource {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// One rendered variant of an uploaded image.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SizeVariant {
    pub width: u32,
    pub height: u32,
    pub url: String,
}

/// The named variants the media pipeline produces for every upload.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ImageSizes {
    pub small: SizeVariant,
    pub medium: SizeVariant,
    pub large: SizeVariant,
    pub xlarge: SizeVariant,
}

/// Result of an upload: the stable identifier plus the variant set.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UploadedImage {
    /// Stable identifier assigned by the media service
    pub public_id: String,
    /// URL of the original image
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub format: String,
    pub bytes: u64,
    pub sizes: ImageSizes,
}

/// A row of the image size registry (`size_images`).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SizeImage {
    pub id: i32,
    /// Size label, e.g. "150x150" or "original"
    pub size: String,
}
