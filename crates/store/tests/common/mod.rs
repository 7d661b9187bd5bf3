//! In-memory [`RecordStore`] fake shared by the integration tests.
//!
//! Behaves like the hosted backend for the subset the stores use:
//! equality filters, single-column ordering, server-assigned `id` and
//! `created_at` on insert. Failures can be injected one call at a time
//! to exercise the error paths.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

use reelnote_core::RecordId;
use reelnote_store::{Filter, OrderBy, RecordStore, StoreError, StoreResult};

pub struct FakeRecordStore {
    tables: Mutex<HashMap<String, Vec<Value>>>,
    calls: AtomicUsize,
    fail_next: AtomicBool,
}

impl FakeRecordStore {
    pub fn new() -> Self {
        Self {
            tables: Mutex::new(HashMap::new()),
            calls: AtomicUsize::new(0),
            fail_next: AtomicBool::new(false),
        }
    }

    /// Make the next call fail with a remote error.
    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    /// Number of calls that reached the store (including failed ones).
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Pre-populate a table.
    pub fn seed(&self, table: &str, rows: Vec<Value>) {
        self.tables.lock().unwrap().insert(table.to_string(), rows);
    }

    /// Current rows of a table, in insertion order.
    pub fn rows(&self, table: &str) -> Vec<Value> {
        self.tables
            .lock()
            .unwrap()
            .get(table)
            .cloned()
            .unwrap_or_default()
    }

    fn record_call(&self) -> StoreResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(StoreError::Remote {
                status: 500,
                message: "injected failure".to_string(),
            });
        }
        Ok(())
    }
}

/// Stringify a JSON value the way filters compare it.
fn as_filter_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[async_trait]
impl RecordStore for FakeRecordStore {
    async fn select(
        &self,
        table: &str,
        filters: &[Filter],
        order: Option<&OrderBy>,
    ) -> StoreResult<Vec<Value>> {
        self.record_call()?;
        let mut rows: Vec<Value> = self
            .rows(table)
            .into_iter()
            .filter(|row| {
                filters.iter().all(|f| {
                    row.get(&f.column)
                        .map(|v| as_filter_string(v) == f.value)
                        .unwrap_or(false)
                })
            })
            .collect();
        if let Some(order) = order {
            rows.sort_by(|a, b| {
                let av = a.get(&order.column);
                let bv = b.get(&order.column);
                let ord = match (av.and_then(Value::as_f64), bv.and_then(Value::as_f64)) {
                    (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(std::cmp::Ordering::Equal),
                    _ => as_filter_string(av.unwrap_or(&Value::Null))
                        .cmp(&as_filter_string(bv.unwrap_or(&Value::Null))),
                };
                if order.ascending {
                    ord
                } else {
                    ord.reverse()
                }
            });
        }
        Ok(rows)
    }

    async fn insert(&self, table: &str, row: Value) -> StoreResult<Value> {
        self.record_call()?;
        let mut stored = row;
        let obj = stored.as_object_mut().expect("row must be a JSON object");
        obj.entry("id").or_insert_with(|| json!(Uuid::new_v4()));
        obj.entry("created_at").or_insert_with(|| json!(Utc::now()));
        self.tables
            .lock()
            .unwrap()
            .entry(table.to_string())
            .or_default()
            .push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, table: &str, id: RecordId, patch: Value) -> StoreResult<Value> {
        self.record_call()?;
        let mut tables = self.tables.lock().unwrap();
        let rows = tables.entry(table.to_string()).or_default();
        let row = rows
            .iter_mut()
            .find(|r| r.get("id").map(as_filter_string) == Some(id.to_string()))
            .ok_or(StoreError::Remote {
                status: 404,
                message: format!("{table}: no row {id}"),
            })?;
        let obj = row.as_object_mut().expect("row must be a JSON object");
        for (key, value) in patch.as_object().cloned().unwrap_or_default() {
            obj.insert(key, value);
        }
        Ok(row.clone())
    }

    async fn delete(&self, table: &str, id: RecordId) -> StoreResult<()> {
        self.record_call()?;
        let mut tables = self.tables.lock().unwrap();
        let rows = tables.entry(table.to_string()).or_default();
        rows.retain(|r| r.get("id").map(as_filter_string) != Some(id.to_string()));
        Ok(())
    }
}
