//! Reelnote domain logic.
//!
//! Pure, I/O-free building blocks for the video-feedback review tool:
//!
//! - [`comment`]: the comment entity, authorship roles, reply linkage.
//! - [`timecode`]: seconds <-> display/SRT/timeline-percent conversions.
//! - [`timeline`]: the scrub-bar pointer interaction state machine.
//! - [`thread`]: display ordering, per-role numbering, reply grouping.
//! - [`export`]: SRT and CSV serialization of a comment collection.
//! - [`project`]: project status lifecycle and dashboard filters.
//!
//! Everything here is synchronous and deterministic; network access and
//! persistence live in `reelnote-store`, change propagation in
//! `reelnote-events`.

pub mod comment;
pub mod error;
pub mod export;
pub mod project;
pub mod thread;
pub mod timecode;
pub mod timeline;
pub mod types;

pub use comment::{Author, Comment, NewComment, REPLY_MARKER};
pub use error::CoreError;
pub use project::{Project, ProjectStatus, StatusCounts, StatusFilter};
pub use thread::{render_order, DisplayComment};
pub use timeline::{ScrubState, TimelineController};
pub use types::{RecordId, Timestamp};
