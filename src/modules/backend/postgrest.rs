use reqwest::{header, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::core::error::{AppError, Result};
use crate::modules::backend::client::BackendClient;

/// `Accept` value that asks the data store for exactly one object instead
/// of a one-element array
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

/// Read/insert access to one table of the relational data store.
///
/// Filters compose PostgREST-style: `eq` adds a `column=eq.value` query
/// parameter, `select` projects columns. One builder performs one call.
pub struct TableQuery<'a> {
    client: &'a BackendClient,
    table: String,
    select: Option<String>,
    filters: Vec<(String, String)>,
}

impl<'a> TableQuery<'a> {
    pub(crate) fn new(client: &'a BackendClient, table: &str) -> Self {
        Self {
            client,
            table: table.to_string(),
            select: None,
            filters: Vec::new(),
        }
    }

    /// Project only the given columns (comma-separated)
    pub fn select(mut self, columns: &str) -> Self {
        self.select = Some(columns.to_string());
        self
    }

    /// Keep rows where `column` equals `value`
    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.filters
            .push((column.to_string(), format!("eq.{}", value.to_string())));
        self
    }

    fn url(&self) -> String {
        format!("{}/rest/v1/{}", self.client.base_url(), self.table)
    }

    fn query_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::with_capacity(self.filters.len() + 1);
        if let Some(select) = &self.select {
            params.push(("select".to_string(), select.clone()));
        }
        params.extend(self.filters.iter().cloned());
        params
    }

    /// Fetch all matching rows
    pub async fn fetch<T: DeserializeOwned>(self) -> Result<Vec<T>> {
        let response = self
            .client
            .request(Method::GET, &self.url())
            .query(&self.query_params())
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Data store request failed: {:?}", e);
                AppError::Upstream(format!("Data store request failed: {}", e))
            })?;

        if !response.status().is_success() {
            return Err(AppError::Upstream(BackendClient::extract_error(response).await));
        }

        response.json::<Vec<T>>().await.map_err(|e| {
            tracing::error!("Failed to parse data store response: {:?}", e);
            AppError::Upstream(format!("Failed to parse data store response: {}", e))
        })
    }

    /// Fetch a single matching row, `None` when the table has no such row
    pub async fn fetch_one<T: DeserializeOwned>(self) -> Result<Option<T>> {
        let response = self
            .client
            .request(Method::GET, &self.url())
            .query(&self.query_params())
            .header(header::ACCEPT, SINGLE_OBJECT)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Data store request failed: {:?}", e);
                AppError::Upstream(format!("Data store request failed: {}", e))
            })?;

        // The data store answers 406 when the filter does not match exactly
        // one row; the lookup callers treat that as "not found"
        if response.status() == StatusCode::NOT_ACCEPTABLE {
            return Ok(None);
        }

        if !response.status().is_success() {
            return Err(AppError::Upstream(BackendClient::extract_error(response).await));
        }

        let row = response.json::<T>().await.map_err(|e| {
            tracing::error!("Failed to parse data store response: {:?}", e);
            AppError::Upstream(format!("Failed to parse data store response: {}", e))
        })?;

        Ok(Some(row))
    }

    /// Insert one row and return its stored representation
    pub async fn insert<T: DeserializeOwned>(self, row: &impl Serialize) -> Result<T> {
        let response = self
            .client
            .request(Method::POST, &self.url())
            .query(&self.query_params())
            .header("Prefer", "return=representation")
            .header(header::ACCEPT, SINGLE_OBJECT)
            .json(row)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Data store insert failed: {:?}", e);
                AppError::Upstream(format!("Data store insert failed: {}", e))
            })?;

        if !response.status().is_success() {
            return Err(AppError::Upstream(BackendClient::extract_error(response).await));
        }

        response.json::<T>().await.map_err(|e| {
            tracing::error!("Failed to parse inserted row: {:?}", e);
            AppError::Upstream(format!("Failed to parse inserted row: {}", e))
        })
    }
}
