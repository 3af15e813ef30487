use chrono::Utc;
use uuid::Uuid;

use crate::core::config::BackendConfig;
use crate::core::error::{AppError, Result};
use crate::features::media::dtos::{max_upload_size, MediaResponseDto};
use crate::modules::backend::BackendClient;
use crate::shared::constants::MEDIA_BUCKET;

/// The file part extracted from the multipart form
#[derive(Debug)]
pub struct MediaFile {
    pub data: Vec<u8>,
    pub file_name: String,
    pub content_type: String,
}

/// Service storing occurrence media attachments
pub struct MediaService {
    config: BackendConfig,
}

impl MediaService {
    pub fn new(config: BackendConfig) -> Self {
        Self { config }
    }

    /// Authenticate the caller, enforce the size limit for the supplied
    /// kind and store the binary under a timestamped per-user path.
    ///
    /// `kind` is free-form: "photo" or "video" by convention, but any
    /// other value is accepted, size-limited as a photo and pluralized
    /// into the folder name as-is.
    pub async fn upload(
        &self,
        authorization: Option<String>,
        file: Option<MediaFile>,
        kind: String,
    ) -> Result<MediaResponseDto> {
        let client = BackendClient::new(&self.config, authorization);

        let user = client
            .current_user()
            .await
            .map_err(|_| AppError::Auth("Usuário não autorizado".to_string()))?;

        let Some(file) = file else {
            return Err(AppError::Validation("Nenhum arquivo enviado".to_string()));
        };

        let max_size = max_upload_size(&kind);
        if file.data.len() > max_size {
            return Err(AppError::Validation(format!(
                "Arquivo muito grande. Máximo: {}MB",
                max_size / 1024 / 1024
            )));
        }

        let path = object_path(
            user.id,
            &kind,
            Utc::now().timestamp_millis(),
            &file.file_name,
        );

        let bucket = client.storage(MEDIA_BUCKET);
        let stored = bucket.upload(&path, file.data, &file.content_type).await?;
        let public_url = bucket.public_url(&stored.path);

        tracing::info!("Media stored at {} for user {}", stored.path, user.id);

        Ok(MediaResponseDto {
            file_name: stored.path,
            public_url,
            media_type: kind,
        })
    }
}

/// Object key for an upload: `{userId}/{kind}s/{epochMillis}_{fileName}`.
/// The folder segment pluralizes whatever kind string was supplied, so an
/// unconventional kind lands in a correspondingly named folder.
fn object_path(user_id: Uuid, kind: &str, timestamp_millis: i64, file_name: &str) -> String {
    format!("{}/{}s/{}_{}", user_id, kind, timestamp_millis, file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_path_layout() {
        let user_id = Uuid::nil();
        assert_eq!(
            object_path(user_id, "photo", 1700000000000, "rua.jpg"),
            "00000000-0000-0000-0000-000000000000/photos/1700000000000_rua.jpg"
        );
        assert_eq!(
            object_path(user_id, "video", 1700000000000, "rua.mp4"),
            "00000000-0000-0000-0000-000000000000/videos/1700000000000_rua.mp4"
        );
    }

    #[test]
    fn test_object_path_pluralizes_any_kind() {
        let user_id = Uuid::nil();
        assert_eq!(
            object_path(user_id, "document", 1, "a.pdf"),
            "00000000-0000-0000-0000-000000000000/documents/1_a.pdf"
        );
        // Empty kind collapses the folder segment to a bare "s"
        assert_eq!(
            object_path(user_id, "", 1, "a.bin"),
            "00000000-0000-0000-0000-000000000000/s/1_a.bin"
        );
    }
}
