//! Polling backstop for comment status changes.
//!
//! The record store offers no push channel in every deployment, so
//! status fields (`is_completed`, `deleted_at`) are periodically
//! re-fetched and published as a [`ChangeEvent::CommentStatusesPolled`]
//! snapshot. Consumers merge that snapshot through
//! `CommentStore::merge_statuses`, which copies only the polled fields
//! and therefore cannot discard newer local edits.
//!
//! Polling runs only when [`SyncStrategy::select`] says the push path
//! is unavailable; with push, the feed alone carries changes.

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use tokio::task::JoinHandle;

use reelnote_core::types::{RecordId, Timestamp};
use reelnote_store::{Filter, PolledStatus, RecordStore, StoreResult, COMMENTS_TABLE};

use crate::bus::{ChangeEvent, ChangeFeed};

/// How often the fallback re-fetches status fields.
///
/// Matches the dashboard's status poll cadence.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

// ---------------------------------------------------------------------------
// Capability check
// ---------------------------------------------------------------------------

/// How change notifications reach this client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStrategy {
    /// The backend pushes changes; no polling needed.
    Push,
    /// No push channel available; fall back to periodic re-fetch.
    Polling,
}

impl SyncStrategy {
    /// Pick a strategy from the backend's advertised capability.
    pub fn select(push_supported: bool) -> Self {
        if push_supported {
            Self::Push
        } else {
            Self::Polling
        }
    }
}

// ---------------------------------------------------------------------------
// StatusPoller
// ---------------------------------------------------------------------------

/// Subset of comment columns the poll reads.
#[derive(Debug, Deserialize)]
struct StatusRow {
    id: RecordId,
    #[serde(default)]
    is_completed: bool,
    #[serde(default)]
    deleted_at: Option<Timestamp>,
}

/// Periodic status re-fetch for one project's comments.
pub struct StatusPoller {
    records: Arc<dyn RecordStore>,
    feed: Arc<ChangeFeed>,
    project_id: RecordId,
    interval: Duration,
}

impl StatusPoller {
    pub fn new(records: Arc<dyn RecordStore>, feed: Arc<ChangeFeed>, project_id: RecordId) -> Self {
        Self {
            records,
            feed,
            project_id,
            interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Run one poll: fetch status fields and publish the snapshot.
    ///
    /// Returns the number of rows polled.
    pub async fn poll_once(&self) -> StoreResult<usize> {
        let rows = self
            .records
            .select(
                COMMENTS_TABLE,
                &[Filter::eq("project_id", self.project_id)],
                None,
            )
            .await?;

        let mut statuses = Vec::with_capacity(rows.len());
        for row in rows {
            let row: StatusRow = serde_json::from_value(row)
                .map_err(|e| reelnote_store::StoreError::Decode(e.to_string()))?;
            statuses.push(PolledStatus {
                comment_id: row.id,
                is_completed: row.is_completed,
                deleted_at: row.deleted_at,
            });
        }

        let count = statuses.len();
        self.feed.publish(ChangeEvent::CommentStatusesPolled {
            project_id: self.project_id,
            statuses,
        });
        Ok(count)
    }

    /// Spawn the poll loop if the chosen strategy needs one.
    ///
    /// Returns `None` under [`SyncStrategy::Push`]. A poll failure is
    /// logged and the loop keeps going; no single failed request stops
    /// the backstop.
    pub fn spawn_if_needed(self, strategy: SyncStrategy) -> Option<PollerGuard> {
        if strategy == SyncStrategy::Push {
            return None;
        }
        Some(PollerGuard {
            handle: tokio::spawn(self.run()),
        })
    }

    async fn run(self) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        // The first tick completes immediately; skip it so the initial
        // load is not raced by a poll.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            match self.poll_once().await {
                Ok(count) => {
                    tracing::trace!(project_id = %self.project_id, count, "status poll")
                }
                Err(err) => {
                    tracing::warn!(project_id = %self.project_id, error = %err, "status poll failed")
                }
            }
        }
    }
}

/// Handle for a running poll loop; aborts the task on drop so the
/// backstop is released on every exit path, including teardown.
pub struct PollerGuard {
    handle: JoinHandle<()>,
}

impl PollerGuard {
    /// Stop the poll loop.
    pub fn shutdown(self) {
        self.handle.abort();
    }
}

impl Drop for PollerGuard {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
