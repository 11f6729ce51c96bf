//! # In-Memory Notification Store
//!
//! Per-recipient ordered deques behind a DashMap, plus a global id-to-owner
//! index for by-id lookups. All mutations for one recipient run inside that
//! recipient's entry lock, which makes insert-plus-eviction a single critical
//! section.

use crate::domain::errors::NotificationError;
use crate::ports::NotificationStore;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use shared_types::{Notification, NotificationId, UserId};
use std::collections::VecDeque;
use tracing::debug;

/// In-memory implementation of [`NotificationStore`].
#[derive(Default)]
pub struct InMemoryNotificationStore {
    /// Records per recipient, oldest first.
    by_recipient: DashMap<UserId, VecDeque<Notification>>,
    /// Owner index for by-id operations.
    owners: DashMap<NotificationId, UserId>,
}

impl InMemoryNotificationStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the owner, then run `f` on the owner's deque entry.
    fn with_recipient<T>(
        &self,
        id: &NotificationId,
        f: impl FnOnce(&mut VecDeque<Notification>) -> Result<T, NotificationError>,
    ) -> Result<T, NotificationError> {
        let owner = *self
            .owners
            .get(id)
            .ok_or(NotificationError::NotFound(*id))?;

        let mut records = self
            .by_recipient
            .get_mut(&owner)
            .ok_or(NotificationError::NotFound(*id))?;
        f(&mut records)
    }

    /// Total records across all recipients.
    pub fn total(&self) -> usize {
        self.by_recipient.iter().map(|r| r.len()).sum()
    }
}

impl NotificationStore for InMemoryNotificationStore {
    fn insert_capped(
        &self,
        notification: Notification,
        cap: usize,
    ) -> Result<Vec<NotificationId>, NotificationError> {
        let recipient = notification.recipient;
        let id = notification.id;

        let mut records = self.by_recipient.entry(recipient).or_default();
        self.owners.insert(id, recipient);
        records.push_back(notification);

        let mut evicted = Vec::new();
        while records.len() > cap {
            // Oldest first: records are appended in creation order.
            if let Some(oldest) = records.pop_front() {
                self.owners.remove(&oldest.id);
                evicted.push(oldest.id);
            }
        }

        if !evicted.is_empty() {
            debug!(
                recipient = %recipient,
                evicted = evicted.len(),
                "Notification retention cap enforced"
            );
        }

        Ok(evicted)
    }

    fn get(&self, id: &NotificationId) -> Result<Notification, NotificationError> {
        self.with_recipient(id, |records| {
            records
                .iter()
                .find(|n| n.id == *id)
                .cloned()
                .ok_or(NotificationError::NotFound(*id))
        })
    }

    fn mark_read(
        &self,
        id: &NotificationId,
        at: DateTime<Utc>,
    ) -> Result<(), NotificationError> {
        self.with_recipient(id, |records| {
            let record = records
                .iter_mut()
                .find(|n| n.id == *id)
                .ok_or(NotificationError::NotFound(*id))?;
            record.mark_read(at);
            Ok(())
        })
    }

    fn mark_unread(&self, id: &NotificationId) -> Result<(), NotificationError> {
        self.with_recipient(id, |records| {
            let record = records
                .iter_mut()
                .find(|n| n.id == *id)
                .ok_or(NotificationError::NotFound(*id))?;
            record.mark_unread();
            Ok(())
        })
    }

    fn mark_all_read(
        &self,
        recipient: &UserId,
        at: DateTime<Utc>,
    ) -> Result<usize, NotificationError> {
        let Some(mut records) = self.by_recipient.get_mut(recipient) else {
            return Ok(0);
        };

        let mut transitioned = 0;
        for record in records.iter_mut().filter(|n| !n.read) {
            record.mark_read(at);
            transitioned += 1;
        }
        Ok(transitioned)
    }

    fn delete(&self, id: &NotificationId) -> Result<(), NotificationError> {
        self.with_recipient(id, |records| {
            let before = records.len();
            records.retain(|n| n.id != *id);
            if records.len() == before {
                return Err(NotificationError::NotFound(*id));
            }
            Ok(())
        })?;
        self.owners.remove(id);
        Ok(())
    }

    fn unread_count(&self, recipient: &UserId) -> Result<usize, NotificationError> {
        Ok(self
            .by_recipient
            .get(recipient)
            .map(|records| records.iter().filter(|n| !n.read).count())
            .unwrap_or(0))
    }

    fn count(&self, recipient: &UserId) -> Result<usize, NotificationError> {
        Ok(self
            .by_recipient
            .get(recipient)
            .map(|records| records.len())
            .unwrap_or(0))
    }

    fn list_page(
        &self,
        recipient: &UserId,
        page: usize,
        per_page: usize,
    ) -> Result<Vec<Notification>, NotificationError> {
        let page = page.max(1);
        Ok(self
            .by_recipient
            .get(recipient)
            .map(|records| {
                records
                    .iter()
                    .rev() // newest first
                    .skip((page - 1) * per_page)
                    .take(per_page)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}
