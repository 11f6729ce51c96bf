//! # Forum Events
//!
//! Defines all event types that flow through the shared bus.

use serde::{Deserialize, Serialize};
use shared_types::{
    AnswerId, CommentId, Notification, QuestionId, UserId, VoteDirection,
};

/// What a vote toggle actually did to the entity's vote record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteAction {
    /// A new vote was added (possibly replacing one in the opposite
    /// direction). Notification-worthy.
    Cast,
    /// An existing same-direction vote was removed (toggle off). Never
    /// produces a notification.
    Retracted,
}

/// All events that can be published to the event bus.
///
/// Content services publish the first four after their state mutation
/// commits; the notification dispatcher publishes `NotificationCreated`
/// after persisting a record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ForumEvent {
    // =========================================================================
    // CONTENT SUBSYSTEM: VOTING
    // =========================================================================
    /// A vote toggle was applied to a question.
    QuestionVoted {
        /// The question that was voted on.
        question_id: QuestionId,
        /// The question's author (notification recipient candidate).
        author: UserId,
        /// The acting user.
        voter: UserId,
        /// Vote direction.
        direction: VoteDirection,
        /// Whether the toggle cast or retracted the vote.
        action: VoteAction,
        /// Score after the toggle.
        score: i64,
    },

    /// A vote toggle was applied to an answer.
    AnswerVoted {
        /// The answer that was voted on.
        answer_id: AnswerId,
        /// The question the answer belongs to.
        question_id: QuestionId,
        /// The answer's author (notification recipient candidate).
        author: UserId,
        /// The acting user.
        voter: UserId,
        /// Vote direction.
        direction: VoteDirection,
        /// Whether the toggle cast or retracted the vote.
        action: VoteAction,
        /// Score after the toggle.
        score: i64,
    },

    // =========================================================================
    // CONTENT SUBSYSTEM: ACCEPTANCE
    // =========================================================================
    /// The question owner accepted an answer.
    AnswerAccepted {
        /// The question whose answer was accepted.
        question_id: QuestionId,
        /// The newly accepted answer.
        answer_id: AnswerId,
        /// The accepted answer's author (reputation beneficiary).
        answer_author: UserId,
        /// The question owner who accepted.
        accepted_by: UserId,
        /// The previously accepted answer that was unmarked, if any.
        previous: Option<AnswerId>,
    },

    // =========================================================================
    // CONTENT SUBSYSTEM: COMMENTS
    // =========================================================================
    /// A comment was posted on a question or an answer.
    CommentPosted {
        /// The new comment.
        comment_id: CommentId,
        /// The question the comment thread hangs off.
        question_id: QuestionId,
        /// Set when the comment targets an answer.
        answer_id: Option<AnswerId>,
        /// Author of the commented content (notification recipient candidate).
        parent_author: UserId,
        /// The commenting user.
        commenter: UserId,
    },

    // =========================================================================
    // NOTIFICATION SUBSYSTEM
    // =========================================================================
    /// A notification record was persisted. Consumed by the push channel.
    NotificationCreated(Notification),
}

impl ForumEvent {
    /// The topic this event belongs to, for subscription filtering.
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::QuestionVoted { .. } | Self::AnswerVoted { .. } => EventTopic::Votes,
            Self::AnswerAccepted { .. } => EventTopic::Acceptance,
            Self::CommentPosted { .. } => EventTopic::Comments,
            Self::NotificationCreated(_) => EventTopic::Notifications,
        }
    }

    /// The subsystem that produces this event, for log context.
    pub fn source_subsystem(&self) -> &'static str {
        match self {
            Self::QuestionVoted { .. }
            | Self::AnswerVoted { .. }
            | Self::AnswerAccepted { .. }
            | Self::CommentPosted { .. } => "forum-content",
            Self::NotificationCreated(_) => "forum-notifications",
        }
    }
}

/// Coarse event classification used by subscription filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Question and answer vote toggles.
    Votes,
    /// Answer acceptance.
    Acceptance,
    /// Comment posting.
    Comments,
    /// Persisted notification records.
    Notifications,
}

/// Filter determining which events a subscription receives.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to receive. Empty means all topics.
    pub topics: Vec<EventTopic>,
}

impl EventFilter {
    /// Receive every event.
    pub fn all() -> Self {
        Self::default()
    }

    /// Receive only the listed topics.
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self { topics }
    }

    /// Whether an event passes this filter.
    pub fn matches(&self, event: &ForumEvent) -> bool {
        self.topics.is_empty() || self.topics.contains(&event.topic())
    }
}
