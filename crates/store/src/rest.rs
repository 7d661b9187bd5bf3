//! REST implementation of [`RecordStore`].
//!
//! Speaks the hosted record store's PostgREST-style dialect: equality
//! filters as `?column=eq.value` query parameters, ordering as
//! `?order=column.asc`, and `Prefer: return=representation` so that
//! inserts and updates hand back the stored row.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde_json::Value;

use reelnote_core::RecordId;

use crate::error::{StoreError, StoreResult};
use crate::record::{Filter, OrderBy, RecordStore};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Record store connection settings loaded from environment variables.
///
/// All fields have defaults suitable for a local development stack; in
/// production, override via environment variables.
#[derive(Debug, Clone)]
pub struct RestConfig {
    /// Base URL of the REST endpoint, without a trailing slash.
    pub base_url: String,
    /// API key, sent both as `apikey` header and bearer token.
    pub api_key: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl RestConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                       | Default                           |
    /// |-------------------------------|-----------------------------------|
    /// | `RECORD_STORE_URL`            | `http://localhost:54321/rest/v1`  |
    /// | `RECORD_STORE_API_KEY`        | (empty)                           |
    /// | `RECORD_STORE_TIMEOUT_SECS`   | `30`                              |
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let base_url = std::env::var("RECORD_STORE_URL")
            .unwrap_or_else(|_| "http://localhost:54321/rest/v1".into());

        let api_key = std::env::var("RECORD_STORE_API_KEY").unwrap_or_default();

        let timeout_secs: u64 = std::env::var("RECORD_STORE_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("RECORD_STORE_TIMEOUT_SECS must be a valid u64");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            timeout_secs,
        }
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// [`RecordStore`] backed by the hosted backend's REST API.
pub struct RestRecordStore {
    http: Client,
    config: RestConfig,
}

impl RestRecordStore {
    /// Build a client with the configured request timeout.
    pub fn new(config: RestConfig) -> StoreResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| StoreError::Transport(e.to_string()))?;
        Ok(Self { http, config })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{table}", self.config.base_url)
    }

    /// Start a request with the auth headers every call carries.
    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        self.http
            .request(method, self.table_url(table))
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
    }

    /// Map a non-success response to [`StoreError::Remote`].
    async fn check(table: &str, response: Response) -> StoreResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        let message = message.chars().take(500).collect::<String>();
        tracing::warn!(table, status = status.as_u16(), %message, "record store request failed");
        Err(StoreError::Remote {
            status: status.as_u16(),
            message,
        })
    }

    /// Pull the single row out of a `return=representation` response.
    fn single_row(table: &str, mut rows: Vec<Value>) -> StoreResult<Value> {
        if rows.is_empty() {
            return Err(StoreError::Remote {
                status: StatusCode::NOT_FOUND.as_u16(),
                message: format!("{table}: no row returned"),
            });
        }
        Ok(rows.remove(0))
    }
}

#[async_trait]
impl RecordStore for RestRecordStore {
    async fn select(
        &self,
        table: &str,
        filters: &[Filter],
        order: Option<&OrderBy>,
    ) -> StoreResult<Vec<Value>> {
        let mut query: Vec<(String, String)> = filters
            .iter()
            .map(|f| (f.column.clone(), format!("eq.{}", f.value)))
            .collect();
        if let Some(order) = order {
            let dir = if order.ascending { "asc" } else { "desc" };
            query.push(("order".into(), format!("{}.{dir}", order.column)));
        }

        tracing::debug!(table, filters = filters.len(), "select");
        let response = self
            .request(Method::GET, table)
            .query(&query)
            .send()
            .await?;
        let rows = Self::check(table, response).await?.json().await?;
        Ok(rows)
    }

    async fn insert(&self, table: &str, row: Value) -> StoreResult<Value> {
        tracing::debug!(table, "insert");
        let response = self
            .request(Method::POST, table)
            .header("Prefer", "return=representation")
            .json(&vec![row])
            .send()
            .await?;
        let rows: Vec<Value> = Self::check(table, response).await?.json().await?;
        Self::single_row(table, rows)
    }

    async fn update(&self, table: &str, id: RecordId, patch: Value) -> StoreResult<Value> {
        tracing::debug!(table, %id, "update");
        let response = self
            .request(Method::PATCH, table)
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=representation")
            .json(&patch)
            .send()
            .await?;
        let rows: Vec<Value> = Self::check(table, response).await?.json().await?;
        Self::single_row(table, rows)
    }

    async fn delete(&self, table: &str, id: RecordId) -> StoreResult<()> {
        tracing::debug!(table, %id, "delete");
        let response = self
            .request(Method::DELETE, table)
            .query(&[("id", format!("eq.{id}"))])
            .send()
            .await?;
        Self::check(table, response).await?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
