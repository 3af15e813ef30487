use reqwest::{header, Method};

use crate::core::error::{AppError, Result};
use crate::modules::backend::client::BackendClient;

/// Upload confirmation; `path` is the object key within the bucket
#[derive(Debug, Clone)]
pub struct UploadedObject {
    pub path: String,
}

/// Write access to one bucket of the blob storage service
pub struct BucketApi<'a> {
    client: &'a BackendClient,
    bucket: String,
}

impl<'a> BucketApi<'a> {
    pub(crate) fn new(client: &'a BackendClient, bucket: &str) -> Self {
        Self {
            client,
            bucket: bucket.to_string(),
        }
    }

    /// Store a binary object at `path`. Overwrites are refused by the
    /// backend (`x-upsert: false`); a path collision surfaces as an
    /// upstream error.
    pub async fn upload(
        &self,
        path: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<UploadedObject> {
        let url = format!(
            "{}/storage/v1/object/{}/{}",
            self.client.base_url(),
            self.bucket,
            encode_object_path(path)
        );

        let response = self
            .client
            .request(Method::POST, &url)
            .header(header::CONTENT_TYPE, content_type)
            .header(header::CACHE_CONTROL, "3600")
            .header("x-upsert", "false")
            .body(data)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Storage upload failed: {:?}", e);
                AppError::Upstream(format!("Storage upload failed: {}", e))
            })?;

        if !response.status().is_success() {
            return Err(AppError::Upstream(BackendClient::extract_error(response).await));
        }

        Ok(UploadedObject {
            path: path.to_string(),
        })
    }

    /// Publicly resolvable URL for an object in this bucket
    pub fn public_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.client.base_url(),
            self.bucket,
            encode_object_path(path)
        )
    }
}

/// Percent-encode each path segment while keeping `/` separators intact.
/// Object keys embed caller-supplied file names, which may carry spaces or
/// non-ASCII characters.
fn encode_object_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
