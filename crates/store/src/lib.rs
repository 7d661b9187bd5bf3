//! Client-side stores for the video-feedback review tool.
//!
//! This crate owns the seam to the external record store and the
//! in-memory collections the UI renders from:
//!
//! - [`RecordStore`]: the async CRUD + query trait the hosted backend
//!   is consumed through; [`RestRecordStore`] is the production
//!   implementation speaking its REST dialect.
//! - [`CommentStore`]: ordered comment collection for one project,
//!   with confirmed-state-only mutation semantics.
//! - [`ProjectStore`]: stateless project CRUD and status transitions.
//!
//! Local state always reflects confirmed remote state: every operation
//! applies its local mutation only after the remote call succeeds, so a
//! failure leaves the collection at the last-confirmed value and the
//! operation can simply be retried.

pub mod comments;
pub mod error;
pub mod models;
pub mod projects;
pub mod record;
pub mod rest;

pub use comments::{CommentPatch, CommentStore, PolledStatus, COMMENTS_TABLE};
pub use error::{StoreError, StoreResult};
pub use projects::{ProjectStore, PROJECTS_TABLE};
pub use record::{Filter, OrderBy, RecordStore};
pub use rest::{RestConfig, RestRecordStore};
