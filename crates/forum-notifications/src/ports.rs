//! # Notification Store Port
//!
//! Storage contract for notification records. Implementations must make
//! `insert_capped` atomic per recipient (insert and eviction in one critical
//! section) so the retention ceiling is never exceeded by more than the
//! in-flight insertion.

use crate::domain::errors::NotificationError;
use chrono::{DateTime, Utc};
use shared_types::{Notification, NotificationId, UserId};

/// Persistence API for notification records.
pub trait NotificationStore: Send + Sync {
    /// Insert a record, evicting the recipient's oldest records while their
    /// count would exceed `cap`.
    ///
    /// Returns the ids of evicted records.
    fn insert_capped(
        &self,
        notification: Notification,
        cap: usize,
    ) -> Result<Vec<NotificationId>, NotificationError>;

    /// Fetch a record snapshot.
    fn get(&self, id: &NotificationId) -> Result<Notification, NotificationError>;

    /// Apply the read transition.
    fn mark_read(&self, id: &NotificationId, at: DateTime<Utc>)
        -> Result<(), NotificationError>;

    /// Apply the unread transition.
    fn mark_unread(&self, id: &NotificationId) -> Result<(), NotificationError>;

    /// Mark all of a recipient's unread records read with one timestamp.
    ///
    /// Returns how many records transitioned.
    fn mark_all_read(
        &self,
        recipient: &UserId,
        at: DateTime<Utc>,
    ) -> Result<usize, NotificationError>;

    /// Permanently remove a record.
    fn delete(&self, id: &NotificationId) -> Result<(), NotificationError>;

    /// Count of a recipient's unread records.
    fn unread_count(&self, recipient: &UserId) -> Result<usize, NotificationError>;

    /// Count of all records stored for a recipient.
    fn count(&self, recipient: &UserId) -> Result<usize, NotificationError>;

    /// One page of a recipient's records, newest first. Pages are 1-indexed.
    fn list_page(
        &self,
        recipient: &UserId,
        page: usize,
        per_page: usize,
    ) -> Result<Vec<Notification>, NotificationError>;
}
