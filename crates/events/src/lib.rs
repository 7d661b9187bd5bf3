//! Change propagation for the video-feedback review tool.
//!
//! - [`ChangeFeed`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`, the push path for comment and project
//!   status changes.
//! - [`StatusPoller`]: periodic re-fetch of comment status fields,
//!   used only as a fallback when the backend offers no push channel
//!   ([`SyncStrategy`] makes that capability check explicit).

pub mod bus;
pub mod poller;

pub use bus::{ChangeEvent, ChangeFeed};
pub use poller::{PollerGuard, StatusPoller, SyncStrategy, DEFAULT_POLL_INTERVAL};
