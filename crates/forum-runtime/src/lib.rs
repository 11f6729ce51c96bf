//! # Forum Runtime
//!
//! Wires the forum core together and runs the choreography handlers.
//!
//! ## Choreography Flow
//!
//! ```text
//! VoteService / AcceptanceService / CommentService
//!     │
//!     ├── QuestionVoted / AnswerVoted / AnswerAccepted / CommentPosted
//!     ▼
//! Event Bus ──────────────► NotificationFanoutHandler
//!     ▲                          │  (dispatcher: suppression, retention)
//!     │                          ▼
//!     └────────────── NotificationCreated
//!                                │
//!                                ▼
//!                        PushDeliveryHandler ──► recipient mailbox
//!                                │
//!                                └── vote events ──► question rooms
//! ```
//!
//! Fan-out is eventually consistent with the triggering action: a vote or
//! acceptance succeeds even when notification persistence or push delivery
//! fails; such failures are logged and counted, never surfaced to the actor.
//!
//! ## Modular Structure
//!
//! - `container/` - Configuration and service construction
//! - `handlers/` - Bus consumers for fan-out and push delivery
//! - `wiring/` - Handler task spawning

pub mod container;
pub mod handlers;
pub mod wiring;

pub use container::{AppContainer, RuntimeConfig};
pub use wiring::spawn_handlers;
