//! # Shared Bus - Event Bus for Inter-Subsystem Communication
//!
//! Implements the choreography pattern used across the forum core:
//!
//! - Content services (voting, acceptance, comments) publish events after
//!   their state mutation commits.
//! - The notification dispatcher consumes those events and persists
//!   notification records, then publishes `NotificationCreated`.
//! - The push channel consumes `NotificationCreated` and forwards payloads to
//!   connected recipient sessions.
//!
//! ## Choreography Pattern
//!
//! ```text
//! ┌──────────────┐                    ┌──────────────┐
//! │ Subsystem A  │                    │ Subsystem B  │
//! │              │    publish()       │              │
//! │              │ ──────┐            │              │
//! └──────────────┘       │            └──────────────┘
//!                        ▼                    ↑
//!                  ┌──────────────┐          │
//!                  │  Event Bus   │          │
//!                  └──────────────┘  subscribe()
//! ```
//!
//! Publishing is fire-and-forget: a bus with no subscribers drops the event
//! and the producing operation still succeeds. The persisted notification
//! store, not the bus, is the durable record.

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod events;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use events::{EventFilter, EventTopic, ForumEvent, VoteAction};
pub use publisher::{EventPublisher, InMemoryEventBus};
pub use subscriber::{EventStream, EventSubscriber, Subscription, SubscriptionError};

/// Maximum events to buffer per subscriber before backpressure.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;
