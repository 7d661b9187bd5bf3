//! The timeline comment entity, authorship roles, and reply linkage.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{RecordId, Timestamp};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Content prefix that marks a reply row.
///
/// Kept for compatibility with rows written before replies carried an
/// explicit `parent_id`; every reply's content still starts with this
/// marker so older readers keep working.
pub const REPLY_MARKER: &str = "Reply: ";

/// Maximum length for a comment's text content.
pub const MAX_COMMENT_LENGTH: usize = 10_000;

// ---------------------------------------------------------------------------
// Authorship
// ---------------------------------------------------------------------------

/// Who wrote a comment.
///
/// The record store encodes this as a nullable `created_by` column: a
/// user id for the authenticated editor, `NULL` for an anonymous client
/// reviewer following a shared link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", content = "id", rename_all = "snake_case")]
pub enum Author {
    /// The authenticated editor who owns the project.
    Editor(RecordId),
    /// An anonymous client reviewer.
    Client,
}

impl Author {
    /// Decode from the wire's nullable `created_by` column.
    pub fn from_created_by(created_by: Option<RecordId>) -> Self {
        match created_by {
            Some(id) => Self::Editor(id),
            None => Self::Client,
        }
    }

    /// Encode to the wire's nullable `created_by` column.
    pub fn created_by(&self) -> Option<RecordId> {
        match *self {
            Self::Editor(id) => Some(id),
            Self::Client => None,
        }
    }

    /// `true` when the author is the project's editor.
    pub fn is_editor(&self) -> bool {
        matches!(self, Self::Editor(_))
    }

    /// Display label used in comment lists and CSV exports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Editor(_) => "Editor",
            Self::Client => "Client",
        }
    }
}

// ---------------------------------------------------------------------------
// Comment
// ---------------------------------------------------------------------------

/// A timestamped comment on a project's video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: RecordId,
    pub project_id: RecordId,
    pub content: String,
    /// Seconds into the video. Replies copy their parent's value.
    pub timestamp: f64,
    pub author: Author,
    /// Explicit reply linkage. Legacy rows predate this field and are
    /// recognized as replies by the [`REPLY_MARKER`] prefix alone.
    pub parent_id: Option<RecordId>,
    pub created_at: Timestamp,
    /// Editor-only resolution flag; ignored on replies.
    pub is_completed: bool,
    /// Soft-delete marker consumed by the export generator.
    pub deleted_at: Option<Timestamp>,
}

impl Comment {
    /// Whether this comment is a reply to another comment.
    ///
    /// Accepts either the explicit `parent_id` or the legacy content
    /// marker, so collections that mix old and new rows behave
    /// consistently.
    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some() || self.content.starts_with(REPLY_MARKER)
    }

    /// Whether this comment appears in SRT/CSV exports.
    pub fn is_exportable(&self) -> bool {
        !self.is_reply() && self.deleted_at.is_none()
    }
}

/// Draft for a new top-level comment, before the record store assigns
/// `id` and `created_at`.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub project_id: RecordId,
    pub content: String,
    pub timestamp: f64,
    pub author: Author,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate comment text: trimmed non-empty and within the length bound.
///
/// Returns the trimmed content on success.
pub fn validate_content(content: &str) -> Result<String, CoreError> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(
            "Comment content must not be empty".to_string(),
        ));
    }
    if trimmed.len() > MAX_COMMENT_LENGTH {
        return Err(CoreError::Validation(format!(
            "Comment content exceeds maximum length of {MAX_COMMENT_LENGTH}"
        )));
    }
    Ok(trimmed.to_string())
}

/// Validate a playback timestamp: finite and non-negative.
///
/// The upper bound is not checked here; the UI clamps interaction-derived
/// values into `[0, duration]` but values already in storage are accepted
/// as-is.
pub fn validate_timestamp(timestamp: f64) -> Result<(), CoreError> {
    if !timestamp.is_finite() || timestamp < 0.0 {
        return Err(CoreError::Validation(format!(
            "Timestamp must be a non-negative number of seconds, got {timestamp}"
        )));
    }
    Ok(())
}

/// Build reply content from free text: trims and prepends [`REPLY_MARKER`].
pub fn reply_content(text: &str) -> String {
    format!("{REPLY_MARKER}{}", text.trim())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
