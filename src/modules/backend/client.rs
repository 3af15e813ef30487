use serde::Deserialize;
use uuid::Uuid;

use crate::core::config::BackendConfig;
use crate::core::error::{AppError, Result};
use crate::modules::backend::postgrest::TableQuery;
use crate::modules::backend::storage::BucketApi;

/// User identity resolved by the backend's identity provider
#[derive(Debug, Clone, Deserialize)]
pub struct BackendUser {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
}

/// Error payload the backend attaches to failed calls. The data store and
/// the storage service use different field names for the same thing.
#[derive(Debug, Deserialize)]
struct BackendErrorResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    msg: Option<String>,
}

impl BackendErrorResponse {
    fn into_message(self) -> Option<String> {
        self.message.or(self.msg).or(self.error)
    }
}

/// Request-scoped client for the managed backend.
///
/// Carries the caller's `Authorization` header verbatim alongside the app's
/// anon key; built per request and dropped when the request ends.
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
    authorization: Option<String>,
}

impl BackendClient {
    pub fn new(config: &BackendConfig, authorization: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.url.clone(),
            anon_key: config.anon_key.clone(),
            authorization,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a request with the anon key and the forwarded caller credential
    pub(crate) fn request(&self, method: reqwest::Method, url: &str) -> reqwest::RequestBuilder {
        let mut builder = self.http.request(method, url).header("apikey", &self.anon_key);

        if let Some(authorization) = &self.authorization {
            builder = builder.header(reqwest::header::AUTHORIZATION, authorization);
        }

        builder
    }

    /// Resolve the calling user through the identity provider.
    ///
    /// Any failure (missing credential, rejected token, unreachable backend)
    /// is an auth error; callers attach their own user-facing message.
    pub async fn current_user(&self) -> Result<BackendUser> {
        if self.authorization.is_none() {
            return Err(AppError::Auth("Missing Authorization header".to_string()));
        }

        let url = format!("{}/auth/v1/user", self.base_url);

        let response = self
            .request(reqwest::Method::GET, &url)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Identity provider request failed: {:?}", e);
                AppError::Auth(format!("Identity provider unreachable: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let message = Self::extract_error(response).await;
            tracing::debug!("Auth check rejected ({}): {}", status, message);
            return Err(AppError::Auth(message));
        }

        response.json::<BackendUser>().await.map_err(|e| {
            tracing::error!("Failed to parse identity response: {:?}", e);
            AppError::Auth(format!("Invalid identity response: {}", e))
        })
    }

    /// Access a table of the relational data store
    pub fn from(&self, table: &str) -> TableQuery<'_> {
        TableQuery::new(self, table)
    }

    /// Access a bucket of the blob storage service
    pub fn storage(&self, bucket: &str) -> BucketApi<'_> {
        BucketApi::new(self, bucket)
    }

    /// Pull the human-readable message out of a failed backend response
    pub(crate) async fn extract_error(response: reqwest::Response) -> String {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        serde_json::from_str::<BackendErrorResponse>(&body)
            .ok()
            .and_then(BackendErrorResponse::into_message)
            .unwrap_or_else(|| format!("Backend returned status {}", status))
    }
}
