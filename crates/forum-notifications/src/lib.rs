//! # Forum Notifications Subsystem
//!
//! Decides whether an action produces a notification, persists the record,
//! and owns read/unread state.
//!
//! ## Rules
//!
//! - **Self-action suppression**: no record is ever created where the actor
//!   is also the recipient; the check runs before any persistence.
//! - **Retention cap**: a recipient keeps at most the most recent
//!   [`shared_types::NOTIFICATION_RETENTION_LIMIT`] records; the oldest is
//!   evicted in the same store call as the insertion.
//! - **Recipient-only access**: read/unread transitions and deletion are
//!   permitted only to the record's recipient.
//! - **Best-effort fan-out**: the dispatcher is invoked from bus consumers;
//!   a store failure is logged by the caller and never fails the vote,
//!   acceptance or comment that triggered it.

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod adapters;
pub mod dispatcher;
pub mod domain;
pub mod ports;

pub use adapters::memory::InMemoryNotificationStore;
pub use dispatcher::{NotificationDispatcher, NotificationPage};
pub use domain::errors::NotificationError;
pub use ports::NotificationStore;
