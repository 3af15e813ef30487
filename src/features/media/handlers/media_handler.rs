use axum::{
    extract::{Multipart, State},
    Json,
};
use std::sync::Arc;
use tracing::debug;

use crate::core::error::{AppError, ErrorBody};
use crate::core::extractor::BearerToken;
use crate::features::media::dtos::{MediaResponseDto, UploadMediaDto};
use crate::features::media::services::{MediaFile, MediaService};
use crate::shared::types::ApiResponse;

/// Upload an occurrence media attachment
///
/// Accepts multipart/form-data with:
/// - `file`: the binary to store (required)
/// - `type`: media kind, "photo" or "video" (free-form; anything other
///   than "video" is size-limited as a photo)
#[utoipa::path(
    post,
    path = "/upload-media",
    tag = "media",
    request_body(
        content = UploadMediaDto,
        content_type = "multipart/form-data",
        description = "Media upload form with a file and its kind",
    ),
    responses(
        (status = 200, description = "Media stored", body = ApiResponse<MediaResponseDto>),
        (status = 400, description = "Missing file or file too large", body = ErrorBody),
        (status = 401, description = "Caller is not authorized", body = ErrorBody),
        (status = 500, description = "Storage failure", body = ErrorBody)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn upload_media(
    BearerToken(authorization): BearerToken,
    State(service): State<Arc<MediaService>>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<MediaResponseDto>>, AppError> {
    let mut file_data: Option<Vec<u8>> = None;
    let mut file_name: Option<String> = None;
    let mut content_type: Option<String> = None;
    let mut kind: Option<String> = None;

    // Process multipart fields
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "file" => {
                let ct = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());

                let fname = field
                    .file_name()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "unnamed".to_string());

                let data = field.bytes().await.map_err(|e| {
                    debug!("Failed to read file bytes: {}", e);
                    AppError::BadRequest(format!("Failed to read file data: {}", e))
                })?;

                file_data = Some(data.to_vec());
                file_name = Some(fname);
                content_type = Some(ct);
            }
            "type" => {
                let text = field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read type field: {}", e))
                })?;
                kind = Some(text);
            }
            _ => {
                // Ignore unknown fields
                debug!("Ignoring unknown field: {}", field_name);
            }
        }
    }

    // The missing-file check lives in the service, after the auth gate:
    // an unauthenticated request is a 401 even when it carries no file
    let file = file_data.map(|data| MediaFile {
        data,
        file_name: file_name.unwrap_or_else(|| "unnamed".to_string()),
        content_type: content_type.unwrap_or_else(|| "application/octet-stream".to_string()),
    });

    let stored = service
        .upload(authorization, file, kind.unwrap_or_default())
        .await?;

    Ok(Json(ApiResponse::success(
        stored,
        Some("Arquivo enviado com sucesso".to_string()),
    )))
}
