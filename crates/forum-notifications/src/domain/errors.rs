//! Error types for the notification subsystem.

use shared_types::NotificationId;
use thiserror::Error;

/// Errors surfaced by notification operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotificationError {
    /// No notification with this id exists.
    #[error("Notification not found: {0}")]
    NotFound(NotificationId),

    /// The acting user is not the notification's recipient.
    #[error("Notification {0} does not belong to the requesting user")]
    NotRecipient(NotificationId),

    /// The persistence layer failed.
    #[error("Storage error: {0}")]
    Storage(String),
}
