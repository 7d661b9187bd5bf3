//! Project entity, review-status lifecycle, and dashboard filters.
//!
//! A project moves through a small status machine as it is shared and
//! reviewed: the editor uploads (`Pending`), shares the review link
//! (`InReview`), the client submits feedback (`CommentNotification`),
//! the editor opens the project and acknowledges the new comments (back
//! to `InReview`), and finally marks the work `Completed`.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{RecordId, Timestamp};

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Stored string form of [`ProjectStatus::Pending`].
pub const STATUS_PENDING: &str = "pending";
/// Stored string form of [`ProjectStatus::InReview`].
pub const STATUS_IN_REVIEW: &str = "in_review";
/// Stored string form of [`ProjectStatus::CommentNotification`].
pub const STATUS_COMMENT_NOTIFICATION: &str = "comment_notification";
/// Stored string form of [`ProjectStatus::Completed`].
pub const STATUS_COMPLETED: &str = "completed";

/// Review lifecycle status of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    /// Uploaded, not yet shared with a client.
    Pending,
    /// Shared and awaiting (or undergoing) client review.
    InReview,
    /// A client submitted feedback the editor has not yet seen.
    CommentNotification,
    /// The editor closed out the review.
    Completed,
}

impl ProjectStatus {
    /// The string stored in the record store's `status` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => STATUS_PENDING,
            Self::InReview => STATUS_IN_REVIEW,
            Self::CommentNotification => STATUS_COMMENT_NOTIFICATION,
            Self::Completed => STATUS_COMPLETED,
        }
    }

    /// Parse a stored status string.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            STATUS_PENDING => Ok(Self::Pending),
            STATUS_IN_REVIEW => Ok(Self::InReview),
            STATUS_COMMENT_NOTIFICATION => Ok(Self::CommentNotification),
            STATUS_COMPLETED => Ok(Self::Completed),
            other => Err(CoreError::Validation(format!(
                "Invalid project status '{other}'. Must be one of: \
                 {STATUS_PENDING}, {STATUS_IN_REVIEW}, {STATUS_COMMENT_NOTIFICATION}, {STATUS_COMPLETED}"
            ))),
        }
    }

    /// `Pending` and `InReview` count as in-progress on the dashboard.
    pub fn is_in_progress(&self) -> bool {
        matches!(self, Self::Pending | Self::InReview)
    }

    /// Status after the editor shares the review link.
    pub fn on_shared(self) -> Self {
        Self::InReview
    }

    /// Status after a client submits their feedback batch.
    pub fn on_feedback_sent(self) -> Self {
        Self::CommentNotification
    }

    /// Status after the editor opens a project with fresh feedback.
    ///
    /// Only `CommentNotification` is consumed; every other status is
    /// left unchanged.
    pub fn acknowledge(self) -> Self {
        match self {
            Self::CommentNotification => Self::InReview,
            other => other,
        }
    }
}

// ---------------------------------------------------------------------------
// Project
// ---------------------------------------------------------------------------

/// A video project owned by an editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: RecordId,
    pub title: String,
    /// Playable URL for the uploaded video.
    pub video_url: String,
    pub thumbnail_url: Option<String>,
    pub status: ProjectStatus,
    /// The owning editor.
    pub user_id: RecordId,
    pub created_at: Timestamp,
}

/// Draft for a new project, before the record store assigns `id` and
/// `created_at`. New projects always start out `Pending`.
#[derive(Debug, Clone)]
pub struct NewProject {
    pub title: String,
    pub video_url: String,
    pub thumbnail_url: Option<String>,
    pub user_id: RecordId,
}

/// Validate a new-project draft: non-empty title and video URL.
pub fn validate_new_project(draft: &NewProject) -> Result<(), CoreError> {
    if draft.title.trim().is_empty() {
        return Err(CoreError::Validation(
            "Project title must not be empty".to_string(),
        ));
    }
    if draft.video_url.trim().is_empty() {
        return Err(CoreError::Validation(
            "Project video URL must not be empty".to_string(),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Dashboard filters
// ---------------------------------------------------------------------------

/// Dashboard status filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Completed,
    /// Covers both `Pending` and `InReview`.
    InProgress,
    NewComments,
}

impl StatusFilter {
    /// Whether a project with `status` passes this filter.
    pub fn matches(&self, status: ProjectStatus) -> bool {
        match self {
            Self::All => true,
            Self::Completed => status == ProjectStatus::Completed,
            Self::InProgress => status.is_in_progress(),
            Self::NewComments => status == ProjectStatus::CommentNotification,
        }
    }
}

/// Per-status project counts shown on the dashboard filter cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusCounts {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub new_comments: usize,
}

impl StatusCounts {
    /// Tally a project list into filter-card counts.
    pub fn tally(projects: &[Project]) -> Self {
        let mut counts = Self {
            total: projects.len(),
            ..Self::default()
        };
        for project in projects {
            match project.status {
                ProjectStatus::Completed => counts.completed += 1,
                ProjectStatus::CommentNotification => counts.new_comments += 1,
                ProjectStatus::Pending | ProjectStatus::InReview => counts.in_progress += 1,
            }
        }
        counts
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
