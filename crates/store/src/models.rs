//! Wire row types for the record store's tables.
//!
//! These mirror the `comments` and `projects` table columns exactly,
//! including the nullable `created_by` authorship encoding; conversion
//! functions translate between rows and the core domain types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use reelnote_core::comment::{Author, Comment, NewComment};
use reelnote_core::project::{NewProject, Project, ProjectStatus};
use reelnote_core::types::{RecordId, Timestamp};

use crate::error::StoreResult;

/* --------------------------------------------------------------------------
   Comments
   -------------------------------------------------------------------------- */

/// A row from the `comments` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentRow {
    pub id: RecordId,
    pub content: String,
    pub timestamp: f64,
    pub project_id: RecordId,
    /// Editor user id, or `NULL` for anonymous client comments.
    pub created_by: Option<RecordId>,
    #[serde(default)]
    pub parent_id: Option<RecordId>,
    pub created_at: Timestamp,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub deleted_at: Option<Timestamp>,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Comment {
            id: row.id,
            project_id: row.project_id,
            content: row.content,
            timestamp: row.timestamp,
            author: Author::from_created_by(row.created_by),
            parent_id: row.parent_id,
            created_at: row.created_at,
            is_completed: row.is_completed,
            deleted_at: row.deleted_at,
        }
    }
}

/// Decode a raw record-store row into a domain comment.
pub fn comment_from_value(value: Value) -> StoreResult<Comment> {
    let row: CommentRow = serde_json::from_value(value)?;
    Ok(row.into())
}

/// Insert payload for the `comments` table. The record store assigns
/// `id` and `created_at`.
#[derive(Debug, Clone, Serialize)]
pub struct NewCommentRow {
    pub content: String,
    pub timestamp: f64,
    pub project_id: RecordId,
    pub created_by: Option<RecordId>,
    pub parent_id: Option<RecordId>,
}

impl NewCommentRow {
    /// Build the insert payload for a top-level comment draft.
    pub fn from_draft(draft: &NewComment) -> Self {
        Self {
            content: draft.content.clone(),
            timestamp: draft.timestamp,
            project_id: draft.project_id,
            created_by: draft.author.created_by(),
            parent_id: None,
        }
    }

    /// Attach reply linkage to the payload.
    pub fn with_parent(mut self, parent_id: RecordId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }
}

/* --------------------------------------------------------------------------
   Projects
   -------------------------------------------------------------------------- */

/// A row from the `projects` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectRow {
    pub id: RecordId,
    pub title: String,
    pub video_url: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    pub status: String,
    pub user_id: RecordId,
    pub created_at: Timestamp,
}

/// Decode a raw record-store row into a domain project.
///
/// Fails with a validation error if the stored status string is not one
/// of the known lifecycle values.
pub fn project_from_value(value: Value) -> StoreResult<Project> {
    let row: ProjectRow = serde_json::from_value(value)?;
    let status = ProjectStatus::parse(&row.status)?;
    Ok(Project {
        id: row.id,
        title: row.title,
        video_url: row.video_url,
        thumbnail_url: row.thumbnail_url,
        status,
        user_id: row.user_id,
        created_at: row.created_at,
    })
}

/// Insert payload for the `projects` table.
#[derive(Debug, Clone, Serialize)]
pub struct NewProjectRow {
    pub title: String,
    pub video_url: String,
    pub thumbnail_url: Option<String>,
    pub status: String,
    pub user_id: RecordId,
}

impl NewProjectRow {
    /// Build the insert payload for a new project; always starts
    /// `pending`.
    pub fn from_draft(draft: &NewProject) -> Self {
        Self {
            title: draft.title.clone(),
            video_url: draft.video_url.clone(),
            thumbnail_url: draft.thumbnail_url.clone(),
            status: ProjectStatus::Pending.as_str().to_string(),
            user_id: draft.user_id,
        }
    }
}

/* --------------------------------------------------------------------------
   Tests
   -------------------------------------------------------------------------- */
