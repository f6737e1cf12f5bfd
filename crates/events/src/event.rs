//! Deletion notification events.

use chrono::{DateTime, Utc};
use common::ProductId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of change announced on a channel.
///
/// Deletion is the only change the gateway propagates; creates and updates
/// travel over the synchronous call path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    Delete,
}

/// Notification that the records owned for a key should be removed.
///
/// Carries no payload beyond the key; consumers delete whatever they hold
/// for it, and deleting an already-deleted key must be a no-op since
/// delivery is at-most-once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletionEvent {
    pub event_id: Uuid,
    pub key: ProductId,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub created_at: DateTime<Utc>,
}

impl DeletionEvent {
    /// Creates a deletion event for the given key, stamped now.
    pub fn new(key: ProductId) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            key,
            event_type: EventType::Delete,
            created_at: Utc::now(),
        }
    }
}
