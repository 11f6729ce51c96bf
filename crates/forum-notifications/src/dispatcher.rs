//! # Notification Dispatcher
//!
//! The single entry point through which notification records are created and
//! their read state transitions.

use crate::domain::errors::NotificationError;
use crate::ports::NotificationStore;
use chrono::Utc;
use shared_bus::{EventPublisher, ForumEvent};
use shared_types::{
    ContentRefs, Identity, Notification, NotificationId, NotificationKind, UserId,
    NOTIFICATION_RETENTION_LIMIT,
};
use std::sync::Arc;
use tracing::debug;

/// One page of a recipient's notifications plus their unread total.
#[derive(Debug, Clone)]
pub struct NotificationPage {
    /// Records, newest first.
    pub notifications: Vec<Notification>,
    /// The recipient's current unread count.
    pub unread_count: usize,
}

/// Creates notification records and owns their read/unread state.
pub struct NotificationDispatcher {
    store: Arc<dyn NotificationStore>,
    bus: Arc<dyn EventPublisher>,
    retention_cap: usize,
}

impl NotificationDispatcher {
    /// Create a dispatcher with the standard retention ceiling.
    pub fn new(store: Arc<dyn NotificationStore>, bus: Arc<dyn EventPublisher>) -> Self {
        Self::with_retention_cap(store, bus, NOTIFICATION_RETENTION_LIMIT)
    }

    /// Create a dispatcher with an explicit retention ceiling.
    pub fn with_retention_cap(
        store: Arc<dyn NotificationStore>,
        bus: Arc<dyn EventPublisher>,
        retention_cap: usize,
    ) -> Self {
        Self {
            store,
            bus,
            retention_cap,
        }
    }

    /// Create and persist a notification for a qualifying action.
    ///
    /// Returns `Ok(None)` without touching the store when the actor is also
    /// the recipient: one's own actions never notify. On success the record
    /// is published as [`ForumEvent::NotificationCreated`] for the push
    /// channel to forward.
    pub async fn notify(
        &self,
        recipient: UserId,
        sender: UserId,
        kind: NotificationKind,
        refs: ContentRefs,
    ) -> Result<Option<Notification>, NotificationError> {
        // The suppression check must run before any persistence.
        if recipient == sender {
            debug!(user = %recipient, kind = kind.as_str(), "Self-action suppressed");
            return Ok(None);
        }

        let notification = Notification::new(recipient, sender, kind, refs);
        self.store
            .insert_capped(notification.clone(), self.retention_cap)?;

        debug!(
            notification_id = %notification.id,
            recipient = %recipient,
            sender = %sender,
            kind = kind.as_str(),
            "Notification created"
        );

        self.bus
            .publish(ForumEvent::NotificationCreated(notification.clone()))
            .await;

        Ok(Some(notification))
    }

    /// Mark one notification read. Recipient-only.
    pub fn mark_read(
        &self,
        id: &NotificationId,
        requester: &Identity,
    ) -> Result<(), NotificationError> {
        self.authorize(id, requester)?;
        self.store.mark_read(id, Utc::now())
    }

    /// Mark one notification unread again. Recipient-only.
    pub fn mark_unread(
        &self,
        id: &NotificationId,
        requester: &Identity,
    ) -> Result<(), NotificationError> {
        self.authorize(id, requester)?;
        self.store.mark_unread(id)
    }

    /// Mark all of the requesting user's unread notifications read with one
    /// shared timestamp.
    pub fn mark_all_read(&self, requester: &Identity) -> Result<usize, NotificationError> {
        self.store.mark_all_read(&requester.user_id, Utc::now())
    }

    /// Permanently delete one notification. Recipient-only.
    pub fn delete(
        &self,
        id: &NotificationId,
        requester: &Identity,
    ) -> Result<(), NotificationError> {
        self.authorize(id, requester)?;
        self.store.delete(id)
    }

    /// The requesting user's unread count.
    pub fn unread_count(&self, requester: &Identity) -> Result<usize, NotificationError> {
        self.store.unread_count(&requester.user_id)
    }

    /// One page of the requesting user's notifications, newest first.
    pub fn list(
        &self,
        requester: &Identity,
        page: usize,
        per_page: usize,
    ) -> Result<NotificationPage, NotificationError> {
        let notifications = self
            .store
            .list_page(&requester.user_id, page, per_page)?;
        let unread_count = self.store.unread_count(&requester.user_id)?;
        Ok(NotificationPage {
            notifications,
            unread_count,
        })
    }

    fn authorize(
        &self,
        id: &NotificationId,
        requester: &Identity,
    ) -> Result<(), NotificationError> {
        let notification = self.store.get(id)?;
        if notification.recipient != requester.user_id {
            return Err(NotificationError::NotRecipient(*id));
        }
        Ok(())
    }
}
