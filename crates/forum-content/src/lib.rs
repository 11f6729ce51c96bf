//! # Forum Content Subsystem
//!
//! Owns the state machines attached to question/answer content:
//!
//! - **Vote ledger**: per-entity upvoter/downvoter sets with toggle
//!   semantics, implemented once over the [`domain::ledger::Votable`]
//!   capability and applied uniformly to questions and answers.
//! - **Acceptance**: owner-only accepted-answer transitions; accepting a new
//!   answer atomically unmarks the previous one so a question never carries
//!   two accepted answers.
//! - **Reputation**: floor-clamped point deltas applied atomically per user.
//!
//! ## Architecture
//!
//! Hexagonal: pure logic in `domain/`, storage contracts in `ports/`,
//! in-memory adapters in `adapters/`, use-case services in `services.rs`.
//! Services publish [`shared_bus::ForumEvent`]s after their mutation commits;
//! notification fan-out is consumed downstream and its failure never fails a
//! vote or accept.

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

pub use adapters::memory::{InMemoryContentStore, InMemoryReputationStore};
pub use domain::errors::ContentError;
pub use domain::ledger::{VoteOutcome, Votable};
pub use ports::store::{AcceptOutcome, AnswerVote, ContentStore, ReputationStore};
pub use services::{AcceptanceService, AuthoringService, CommentService, VoteService, VoteTarget};
