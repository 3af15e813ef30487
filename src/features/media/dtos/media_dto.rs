use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Upload media request DTO for OpenAPI documentation
/// Note: This struct is for Swagger UI documentation only.
/// The actual handler uses axum's Multipart extractor directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadMediaDto {
    /// The file to upload
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub file: String,
    /// Media kind: "photo" or "video"
    #[schema(example = "photo")]
    pub r#type: Option<String>,
}

/// Response DTO for a stored media object
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MediaResponseDto {
    /// Object key within the media bucket
    pub file_name: String,
    /// Publicly resolvable URL of the stored object
    pub public_url: String,
    /// The `type` string supplied by the caller, echoed back
    #[serde(rename = "type")]
    pub media_type: String,
}

/// Maximum upload size for videos (50MB)
pub const MAX_VIDEO_SIZE: usize = 50 * 1024 * 1024;

/// Maximum upload size for photos (5MB)
pub const MAX_PHOTO_SIZE: usize = 5 * 1024 * 1024;

/// Size limit for a media kind. Only the literal "video" selects the video
/// limit; every other value, recognized or not, falls back to the photo
/// limit. The kind is deliberately not restricted to a closed set.
pub fn max_upload_size(kind: &str) -> usize {
    if kind == "video" {
        MAX_VIDEO_SIZE
    } else {
        MAX_PHOTO_SIZE
    }
}
