//! # Notification Records
//!
//! One persisted record per fan-out event. Notifications reference content by
//! id only (weak references); callers resolving a reference to content that
//! has since been deleted must degrade gracefully rather than error.

use crate::ids::{AnswerId, CommentId, NotificationId, QuestionId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Ceiling on stored notifications per recipient. When an insertion would
/// exceed it, the recipient's oldest notification is evicted.
pub const NOTIFICATION_RETENTION_LIMIT: usize = 100;

/// The fixed fan-out event classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// Someone commented on the recipient's question or answer.
    Comment,
    /// Someone upvoted the recipient's question or answer.
    Upvote,
    /// Someone downvoted the recipient's question or answer.
    Downvote,
    /// The recipient's answer was accepted.
    Accepted,
}

impl NotificationKind {
    /// Wire label, matching the fixed enumeration exactly.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Comment => "comment",
            Self::Upvote => "upvote",
            Self::Downvote => "downvote",
            Self::Accepted => "accepted",
        }
    }
}

/// Optional bundle of content references carried by a notification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRefs {
    /// The question involved, if any.
    pub question_id: Option<QuestionId>,
    /// The answer involved, if any.
    pub answer_id: Option<AnswerId>,
    /// The comment involved, if any.
    pub comment_id: Option<CommentId>,
}

impl ContentRefs {
    /// References just a question.
    pub fn question(question_id: QuestionId) -> Self {
        Self {
            question_id: Some(question_id),
            ..Self::default()
        }
    }

    /// References an answer within its question.
    pub fn answer(question_id: QuestionId, answer_id: AnswerId) -> Self {
        Self {
            question_id: Some(question_id),
            answer_id: Some(answer_id),
            ..Self::default()
        }
    }

    /// References a comment together with its parent content.
    pub fn comment(
        question_id: QuestionId,
        answer_id: Option<AnswerId>,
        comment_id: CommentId,
    ) -> Self {
        Self {
            question_id: Some(question_id),
            answer_id,
            comment_id: Some(comment_id),
        }
    }
}

/// A persisted notification record.
///
/// ## Invariants
///
/// - `recipient != sender` is required at creation time; the dispatcher never
///   constructs a record where the actor is also the recipient.
/// - `read_at` is `None` exactly while `read` is `false`.
/// - Mutated only by read/unread transitions after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    /// Stable identifier.
    pub id: NotificationId,
    /// The user this notification is for.
    pub recipient: UserId,
    /// The user whose action produced it.
    pub sender: UserId,
    /// Event classification.
    pub kind: NotificationKind,
    /// Weak references to the content involved.
    pub refs: ContentRefs,
    /// Whether the recipient has read it.
    pub read: bool,
    /// When the recipient read it. `None` until read.
    pub read_at: Option<DateTime<Utc>>,
    /// Creation timestamp; retention eviction orders by this.
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Build an unread notification stamped with the current time.
    pub fn new(recipient: UserId, sender: UserId, kind: NotificationKind, refs: ContentRefs) -> Self {
        Self {
            id: NotificationId::new(),
            recipient,
            sender,
            kind,
            refs,
            read: false,
            read_at: None,
            created_at: Utc::now(),
        }
    }

    /// Apply the read transition.
    pub fn mark_read(&mut self, at: DateTime<Utc>) {
        self.read = true;
        self.read_at = Some(at);
    }

    /// Apply the unread transition.
    pub fn mark_unread(&mut self) {
        self.read = false;
        self.read_at = None;
    }
}
