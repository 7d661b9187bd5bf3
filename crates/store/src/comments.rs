//! In-memory comment collection for one project, synced against the
//! record store.
//!
//! [`CommentStore`] never applies an optimistic prediction: each
//! mutation goes to the record store first and the local collection
//! changes only once the remote call has succeeded. A failed call
//! therefore leaves the collection exactly at the last confirmed state
//! and the operation can be retried by repeating the user action.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;

use reelnote_core::comment::{
    reply_content, validate_content, validate_timestamp, Author, Comment, NewComment,
};
use reelnote_core::types::{RecordId, Timestamp};
use reelnote_core::CoreError;

use crate::error::StoreResult;
use crate::models::{comment_from_value, NewCommentRow};
use crate::record::{Filter, OrderBy, RecordStore};

/// Record store table holding comments.
pub const COMMENTS_TABLE: &str = "comments";

// ---------------------------------------------------------------------------
// Patch types
// ---------------------------------------------------------------------------

/// Partial update for a comment. Unset fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct CommentPatch {
    pub content: Option<String>,
    pub is_completed: Option<bool>,
}

/// Status fields re-fetched by the polling backstop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolledStatus {
    pub comment_id: RecordId,
    pub is_completed: bool,
    pub deleted_at: Option<Timestamp>,
}

// ---------------------------------------------------------------------------
// CommentStore
// ---------------------------------------------------------------------------

/// Ordered collection of one project's comments.
pub struct CommentStore {
    records: Arc<dyn RecordStore>,
    project_id: RecordId,
    comments: Vec<Comment>,
}

impl CommentStore {
    pub fn new(records: Arc<dyn RecordStore>, project_id: RecordId) -> Self {
        Self {
            records,
            project_id,
            comments: Vec::new(),
        }
    }

    pub fn project_id(&self) -> RecordId {
        self.project_id
    }

    /// The current confirmed comment collection, ordered as loaded.
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    fn find(&self, id: RecordId) -> StoreResult<&Comment> {
        self.comments
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| CoreError::not_found("comment", id).into())
    }

    // -- Operations ----------------------------------------------------------

    /// Fetch all comments for the project, ordered by ascending
    /// timestamp.
    ///
    /// The local collection is replaced only after the whole response
    /// has been fetched and decoded; any failure leaves prior state
    /// untouched.
    pub async fn load(&mut self) -> StoreResult<()> {
        let rows = self
            .records
            .select(
                COMMENTS_TABLE,
                &[Filter::eq("project_id", self.project_id)],
                Some(&OrderBy::asc("timestamp")),
            )
            .await?;

        let mut loaded = Vec::with_capacity(rows.len());
        for row in rows {
            loaded.push(comment_from_value(row)?);
        }
        self.comments = loaded;
        tracing::debug!(project_id = %self.project_id, count = self.comments.len(), "comments loaded");
        Ok(())
    }

    /// Create a top-level comment at the given playback time.
    ///
    /// Validation happens locally before any network call: blank
    /// content and invalid timestamps are rejected with no request
    /// issued and no state change.
    pub async fn create(
        &mut self,
        content: &str,
        timestamp: f64,
        author: Author,
    ) -> StoreResult<Comment> {
        let content = validate_content(content)?;
        validate_timestamp(timestamp)?;

        let draft = NewComment {
            project_id: self.project_id,
            content,
            timestamp,
            author,
        };
        let row = NewCommentRow::from_draft(&draft);
        let stored = self
            .records
            .insert(COMMENTS_TABLE, serde_json::to_value(row)?)
            .await?;
        let comment = comment_from_value(stored)?;
        self.comments.push(comment.clone());
        Ok(comment)
    }

    /// Create a reply to an existing comment.
    ///
    /// The reply copies its parent's timestamp, records the explicit
    /// `parent_id`, and carries the marker-prefixed content for older
    /// readers. Blank text is a silent no-op: `Ok(None)`, no request
    /// issued.
    pub async fn reply(
        &mut self,
        parent_id: RecordId,
        text: &str,
        author: Author,
    ) -> StoreResult<Option<Comment>> {
        if text.trim().is_empty() {
            return Ok(None);
        }
        let parent = self.find(parent_id)?;
        let draft = NewComment {
            project_id: self.project_id,
            content: reply_content(text),
            timestamp: parent.timestamp,
            author,
        };
        let row = NewCommentRow::from_draft(&draft).with_parent(parent_id);
        let stored = self
            .records
            .insert(COMMENTS_TABLE, serde_json::to_value(row)?)
            .await?;
        let comment = comment_from_value(stored)?;
        self.comments.push(comment.clone());
        Ok(Some(comment))
    }

    /// Apply a partial update to a comment.
    ///
    /// The local entry is replaced with the row the record store hands
    /// back, so local state is the confirmed remote state, not a
    /// prediction.
    pub async fn update(&mut self, id: RecordId, patch: CommentPatch) -> StoreResult<Comment> {
        self.find(id)?;

        let mut body = serde_json::Map::new();
        if let Some(content) = &patch.content {
            body.insert("content".into(), json!(validate_content(content)?));
        }
        if let Some(is_completed) = patch.is_completed {
            body.insert("is_completed".into(), json!(is_completed));
        }
        if body.is_empty() {
            // Nothing to change; skip the network round-trip.
            return Ok(self.find(id)?.clone());
        }

        let stored = self
            .records
            .update(COMMENTS_TABLE, id, serde_json::Value::Object(body))
            .await?;
        let updated = comment_from_value(stored)?;
        if let Some(local) = self.comments.iter_mut().find(|c| c.id == id) {
            *local = updated.clone();
        }
        Ok(updated)
    }

    /// Set the editor's resolution flag on a comment.
    pub async fn set_completed(&mut self, id: RecordId, is_completed: bool) -> StoreResult<Comment> {
        self.update(
            id,
            CommentPatch {
                is_completed: Some(is_completed),
                ..CommentPatch::default()
            },
        )
        .await
    }

    /// Flip the resolution flag, returning the new value.
    pub async fn toggle_completed(&mut self, id: RecordId) -> StoreResult<bool> {
        let next = !self.find(id)?.is_completed;
        self.set_completed(id, next).await?;
        Ok(next)
    }

    /// Delete a comment.
    ///
    /// Callers must have obtained explicit user confirmation before
    /// invoking this; the store performs the remote delete and removes
    /// the local entry only once it succeeds.
    pub async fn delete(&mut self, id: RecordId) -> StoreResult<()> {
        self.find(id)?;
        self.records.delete(COMMENTS_TABLE, id).await?;
        self.comments.retain(|c| c.id != id);
        Ok(())
    }

    // -- Poll reconciliation -------------------------------------------------

    /// Merge a polled status snapshot into the local collection.
    ///
    /// Only the polled fields (`is_completed`, `deleted_at`) are
    /// copied; `content`, `timestamp`, and everything else stay at the
    /// local value so a stale poll can never discard a newer local
    /// edit. Local rows absent from the snapshot are kept (they may be
    /// mid-flight inserts); unknown polled rows are ignored and arrive
    /// through the next [`load`](Self::load).
    pub fn merge_statuses(&mut self, polled: &[PolledStatus]) {
        for status in polled {
            if let Some(local) = self.comments.iter_mut().find(|c| c.id == status.comment_id) {
                local.is_completed = status.is_completed;
                local.deleted_at = status.deleted_at;
            }
        }
    }
}
