use axum::{extract::DefaultBodyLimit, routing::post, Router};
use std::sync::Arc;

use crate::core::middleware::cors_ok;
use crate::features::media::dtos::MAX_VIDEO_SIZE;
use crate::features::media::handlers::upload_media;
use crate::features::media::services::MediaService;

/// Create routes for the media feature
pub fn routes(media_service: Arc<MediaService>) -> Router {
    Router::new()
        .route(
            "/upload-media",
            // Allow body size up to the video limit + buffer for multipart
            // overhead; the per-kind limit is enforced by the service
            post(upload_media)
                .options(cors_ok)
                .layer(DefaultBodyLimit::max(MAX_VIDEO_SIZE + 1024 * 1024)),
        )
        .with_state(media_service)
}
