//! In-process change feed backed by a `tokio::sync::broadcast` channel.
//!
//! [`ChangeFeed`] is the publish/subscribe hub for [`ChangeEvent`]s.
//! It is designed to be shared via `Arc<ChangeFeed>` between the stores
//! (publishers) and whatever view layer is rendering (subscribers).

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use reelnote_core::project::ProjectStatus;
use reelnote_core::types::RecordId;
use reelnote_store::PolledStatus;

// ---------------------------------------------------------------------------
// ChangeEvent
// ---------------------------------------------------------------------------

/// A change to review state that subscribers should re-render for.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChangeEvent {
    CommentCreated {
        project_id: RecordId,
        comment_id: RecordId,
    },
    CommentUpdated {
        project_id: RecordId,
        comment_id: RecordId,
    },
    CommentDeleted {
        project_id: RecordId,
        comment_id: RecordId,
    },
    /// Status snapshot from the polling fallback; feed through
    /// `CommentStore::merge_statuses`.
    CommentStatusesPolled {
        project_id: RecordId,
        statuses: Vec<PolledStatus>,
    },
    ProjectStatusChanged {
        project_id: RecordId,
        status: ProjectStatus,
    },
}

// ---------------------------------------------------------------------------
// ChangeFeed
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 256;

/// In-process fan-out hub for [`ChangeEvent`]s.
pub struct ChangeFeed {
    sender: broadcast::Sender<ChangeEvent>,
}

impl ChangeFeed {
    /// Create a feed with a specific channel capacity.
    ///
    /// When the buffer is full the oldest un-consumed events are
    /// dropped and slow receivers observe a `RecvError::Lagged`; a
    /// lagging subscriber should fall back to a full reload.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// With zero subscribers the event is silently dropped; state lives
    /// in the stores, the feed only signals "re-render".
    pub fn publish(&self, event: ChangeEvent) {
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events published on this feed.
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.sender.subscribe()
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
