//! # Forum Push Subsystem
//!
//! Best-effort real-time delivery of notifications and question activity to
//! connected sessions.
//!
//! ## Contract
//!
//! - Each user has one logical **mailbox channel** keyed by user id; every
//!   connected session of that user subscribes to it.
//! - A session connects with an already-resolved identity; subscription is
//!   impossible without one, and room operations from unknown sessions are
//!   rejected.
//! - Publishing to a user with no connected sessions drops the payload and
//!   only counts a miss; it never blocks or errors the triggering request.
//!   The persisted notification store remains the source of truth and the
//!   poll/fetch path must always work without this channel.
//! - Sessions may additionally join per-question **rooms** while viewing a
//!   question; rooms carry no delivery guarantee.

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod channel;
pub mod payload;

pub use channel::{PushChannel, PushError, SessionHandle};
pub use payload::{PushPayload, RoomKey};

/// Maximum payloads buffered per mailbox subscriber before older entries are
/// overwritten.
pub const MAILBOX_CHANNEL_CAPACITY: usize = 256;

/// Maximum payloads buffered per room subscriber.
pub const ROOM_CHANNEL_CAPACITY: usize = 1024;

/// Maximum rooms one session may be joined to at once.
pub const MAX_ROOMS_PER_SESSION: u32 = 32;
