//! # Core Domain Entities
//!
//! Defines the content entities the voting core operates on.
//!
//! ## Clusters
//!
//! - **Content**: `Question`, `Answer`, `Comment`
//! - **Voting**: `VoteDirection`, `VoteRecord`
//! - **Users**: `UserAccount`

use crate::ids::{AnswerId, CommentId, QuestionId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Reputation granted to an answer's author when the answer is accepted.
pub const ACCEPTED_ANSWER_REPUTATION: i64 = 15;

/// Reputation never drops below this floor, regardless of applied deltas.
pub const REPUTATION_FLOOR: i64 = 1;

// =============================================================================
// CLUSTER: VOTING
// =============================================================================

/// Direction of a single vote action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteDirection {
    /// Upvote.
    Up,
    /// Downvote.
    Down,
}

impl VoteDirection {
    /// The opposite direction.
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }
}

/// Per-entity record of which users have upvoted or downvoted.
///
/// ## Invariants
///
/// - A user id appears in at most one of the two sets at any time.
/// - Sets hold no duplicates; insertion order is irrelevant.
/// - The record is created empty with its entity and is only mutated through
///   the vote toggle operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteRecord {
    /// Users that currently upvote the entity.
    pub upvoters: HashSet<UserId>,
    /// Users that currently downvote the entity.
    pub downvoters: HashSet<UserId>,
}

impl VoteRecord {
    /// An empty vote record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Derived score: `|upvoters| - |downvoters|`.
    pub fn score(&self) -> i64 {
        self.upvoters.len() as i64 - self.downvoters.len() as i64
    }

    /// Total number of votes in either direction.
    pub fn total(&self) -> usize {
        self.upvoters.len() + self.downvoters.len()
    }

    /// The set matching a direction.
    pub fn set(&self, direction: VoteDirection) -> &HashSet<UserId> {
        match direction {
            VoteDirection::Up => &self.upvoters,
            VoteDirection::Down => &self.downvoters,
        }
    }

    /// The set matching a direction, mutable.
    pub fn set_mut(&mut self, direction: VoteDirection) -> &mut HashSet<UserId> {
        match direction {
            VoteDirection::Up => &mut self.upvoters,
            VoteDirection::Down => &mut self.downvoters,
        }
    }

    /// Whether the user currently holds a vote in the given direction.
    pub fn has_vote(&self, user: &UserId, direction: VoteDirection) -> bool {
        self.set(direction).contains(user)
    }
}

// =============================================================================
// CLUSTER: CONTENT
// =============================================================================

/// A question posted by a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Stable identifier.
    pub id: QuestionId,
    /// The posting user.
    pub author: UserId,
    /// Title shown in listings.
    pub title: String,
    /// Markdown body.
    pub body: String,
    /// Lowercased tag labels.
    pub tags: Vec<String>,
    /// Votes cast on this question.
    pub votes: VoteRecord,
    /// Number of non-deleted answers referencing this question.
    ///
    /// Maintained on answer post and answer soft-delete; always equals the
    /// count of live answers.
    pub answer_count: u32,
    /// The currently accepted answer, if any. At most one at any time.
    pub accepted_answer_id: Option<AnswerId>,
    /// Soft-delete tombstone. Deleted content is not votable.
    pub is_deleted: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Question {
    /// Create a new question with an empty vote record.
    pub fn new(author: UserId, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: QuestionId::new(),
            author,
            title: title.into(),
            body: body.into(),
            tags: Vec::new(),
            votes: VoteRecord::new(),
            answer_count: 0,
            accepted_answer_id: None,
            is_deleted: false,
            created_at: Utc::now(),
        }
    }

    /// Whether any answer has been accepted.
    pub fn has_accepted_answer(&self) -> bool {
        self.accepted_answer_id.is_some()
    }
}

/// An answer posted to a question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    /// Stable identifier.
    pub id: AnswerId,
    /// The question this answer belongs to.
    pub question_id: QuestionId,
    /// The posting user.
    pub author: UserId,
    /// Markdown body.
    pub body: String,
    /// Votes cast on this answer.
    pub votes: VoteRecord,
    /// Whether this answer is the question's accepted answer.
    pub is_accepted: bool,
    /// When the answer was accepted. `None` unless `is_accepted`.
    pub accepted_at: Option<DateTime<Utc>>,
    /// Who accepted the answer. `None` unless `is_accepted`.
    pub accepted_by: Option<UserId>,
    /// Soft-delete tombstone. Deleted content is not votable.
    pub is_deleted: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Answer {
    /// Create a new answer with an empty vote record.
    pub fn new(question_id: QuestionId, author: UserId, body: impl Into<String>) -> Self {
        Self {
            id: AnswerId::new(),
            question_id,
            author,
            body: body.into(),
            votes: VoteRecord::new(),
            is_accepted: false,
            accepted_at: None,
            accepted_by: None,
            is_deleted: false,
            created_at: Utc::now(),
        }
    }

    /// Mark this answer accepted by the given user.
    pub fn mark_accepted(&mut self, accepted_by: UserId, at: DateTime<Utc>) {
        self.is_accepted = true;
        self.accepted_at = Some(at);
        self.accepted_by = Some(accepted_by);
    }

    /// Clear the accepted flag (a different answer was accepted instead).
    pub fn clear_accepted(&mut self) {
        self.is_accepted = false;
        self.accepted_at = None;
        self.accepted_by = None;
    }
}

/// A comment on a question or on an answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    /// Stable identifier.
    pub id: CommentId,
    /// The commenting user.
    pub author: UserId,
    /// The question the comment thread hangs off.
    pub question_id: QuestionId,
    /// Set when the comment targets an answer rather than the question.
    pub answer_id: Option<AnswerId>,
    /// Comment text.
    pub body: String,
    /// Soft-delete tombstone.
    pub is_deleted: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Comment on a question.
    pub fn on_question(author: UserId, question_id: QuestionId, body: impl Into<String>) -> Self {
        Self {
            id: CommentId::new(),
            author,
            question_id,
            answer_id: None,
            body: body.into(),
            is_deleted: false,
            created_at: Utc::now(),
        }
    }

    /// Comment on an answer.
    pub fn on_answer(
        author: UserId,
        question_id: QuestionId,
        answer_id: AnswerId,
        body: impl Into<String>,
    ) -> Self {
        Self {
            id: CommentId::new(),
            author,
            question_id,
            answer_id: Some(answer_id),
            body: body.into(),
            is_deleted: false,
            created_at: Utc::now(),
        }
    }
}

// =============================================================================
// CLUSTER: USERS
// =============================================================================

/// A registered user account as seen by the voting core.
///
/// Credential material lives in the authentication layer; the core only
/// tracks the reputation scalar it mutates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    /// Stable identifier.
    pub id: UserId,
    /// Display name.
    pub username: String,
    /// Reputation score. Floor-clamped at [`REPUTATION_FLOOR`].
    pub reputation: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl UserAccount {
    /// Create an account at the reputation floor.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            id: UserId::new(),
            username: username.into(),
            reputation: REPUTATION_FLOOR,
            created_at: Utc::now(),
        }
    }
}
