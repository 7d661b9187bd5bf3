//! The record-store seam.
//!
//! The hosted backend is consumed, not owned: a generic table store
//! with CRUD plus query-by-field and ordering, reached over network
//! calls that may fail. [`RecordStore`] is the trait the rest of this
//! crate programs against; production uses
//! [`RestRecordStore`](crate::rest::RestRecordStore) and tests swap in
//! an in-memory fake.

use async_trait::async_trait;
use serde_json::Value;

use reelnote_core::RecordId;

use crate::error::StoreResult;

/// An equality filter on one column.
#[derive(Debug, Clone)]
pub struct Filter {
    pub column: String,
    pub value: String,
}

impl Filter {
    /// `column = value`.
    pub fn eq(column: impl Into<String>, value: impl ToString) -> Self {
        Self {
            column: column.into(),
            value: value.to_string(),
        }
    }
}

/// Result ordering on one column.
#[derive(Debug, Clone)]
pub struct OrderBy {
    pub column: String,
    pub ascending: bool,
}

impl OrderBy {
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            ascending: true,
        }
    }

    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            ascending: false,
        }
    }
}

/// Async request/response interface to the external record store.
///
/// Rows travel as JSON objects; the typed wire structs live in
/// [`models`](crate::models). Every call is a single request with no
/// streaming; failures surface as
/// [`StoreError`](crate::error::StoreError).
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch all rows of `table` matching every filter, optionally
    /// ordered.
    async fn select(
        &self,
        table: &str,
        filters: &[Filter],
        order: Option<&OrderBy>,
    ) -> StoreResult<Vec<Value>>;

    /// Insert a row, returning it as stored (with server-assigned `id`
    /// and `created_at`).
    async fn insert(&self, table: &str, row: Value) -> StoreResult<Value>;

    /// Patch the row with the given `id`, returning the updated row.
    async fn update(&self, table: &str, id: RecordId, patch: Value) -> StoreResult<Value>;

    /// Delete the row with the given `id`.
    async fn delete(&self, table: &str, id: RecordId) -> StoreResult<()>;
}
