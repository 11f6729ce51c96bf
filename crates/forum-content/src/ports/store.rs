//! # Content and Reputation Store Ports
//!
//! Op-level storage abstractions. Every mutating operation is a single
//! atomic unit against one entity's record (plus, for acceptance, the
//! answers whose flags the transition touches): implementations must apply
//! each as a read-modify-write under that entity's lock or an equivalent
//! mechanism, never as a naive read-then-write-back. Concurrent toggles from
//! different users against the same entity must both be reflected in the
//! final vote sets.

use crate::domain::errors::ContentError;
use crate::domain::ledger::VoteOutcome;
use shared_types::{
    Answer, AnswerId, Comment, Question, QuestionId, UserAccount, UserId, VoteDirection,
};

/// Result of a vote toggle on an answer, carrying the parent question id for
/// event fan-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerVote {
    /// The toggle outcome.
    pub outcome: VoteOutcome,
    /// The question the answer belongs to.
    pub question_id: QuestionId,
}

/// Committed acceptance transition, as observed by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcceptOutcome {
    /// The question whose answer was accepted.
    pub question_id: QuestionId,
    /// The newly accepted answer.
    pub answer_id: AnswerId,
    /// The accepted answer's author (reputation beneficiary).
    pub answer_author: UserId,
    /// The question owner who accepted.
    pub accepted_by: UserId,
    /// The previously accepted answer that was unmarked, if any.
    pub previous: Option<AnswerId>,
}

/// Primary persistence API for question/answer/comment content.
pub trait ContentStore: Send + Sync {
    // === Creation ===

    /// Persist a new question.
    fn insert_question(&self, question: Question) -> Result<(), ContentError>;

    /// Persist a new answer and increment its question's live answer count.
    fn insert_answer(&self, answer: Answer) -> Result<(), ContentError>;

    /// Persist a new comment after validating its parent content exists.
    ///
    /// Returns the parent content's author for notification fan-out.
    fn insert_comment(&self, comment: Comment) -> Result<UserId, ContentError>;

    // === Reads ===

    /// Fetch a question snapshot. Soft-deleted questions report not-found.
    fn question(&self, id: &QuestionId) -> Result<Question, ContentError>;

    /// Fetch an answer snapshot. Soft-deleted answers report not-found.
    fn answer(&self, id: &AnswerId) -> Result<Answer, ContentError>;

    // === Atomic mutations ===

    /// Apply one user's vote toggle to a question.
    fn vote_question(
        &self,
        id: &QuestionId,
        voter: UserId,
        direction: VoteDirection,
    ) -> Result<VoteOutcome, ContentError>;

    /// Apply one user's vote toggle to an answer.
    fn vote_answer(
        &self,
        id: &AnswerId,
        voter: UserId,
        direction: VoteDirection,
    ) -> Result<AnswerVote, ContentError>;

    /// Accept an answer on behalf of the acting user.
    ///
    /// The whole transition (owner check, membership check, unmarking the
    /// previous accepted answer, marking the new one) commits atomically
    /// with respect to other acceptances on the same question.
    fn accept_answer(
        &self,
        question_id: &QuestionId,
        answer_id: &AnswerId,
        acting_user: UserId,
    ) -> Result<AcceptOutcome, ContentError>;

    /// Soft-delete an answer and decrement its question's live answer count.
    fn soft_delete_answer(&self, id: &AnswerId) -> Result<(), ContentError>;

    /// Soft-delete a question.
    fn soft_delete_question(&self, id: &QuestionId) -> Result<(), ContentError>;
}

/// Persistence API for user reputation.
pub trait ReputationStore: Send + Sync {
    /// Persist a new account.
    fn insert_account(&self, account: UserAccount) -> Result<(), ContentError>;

    /// Apply a floor-clamped delta to a user's reputation.
    ///
    /// Must be increment-style atomic per user: a user can be the
    /// simultaneous beneficiary of multiple concurrent accept events and
    /// every delta must land.
    fn adjust(&self, user: &UserId, delta: i64) -> Result<i64, ContentError>;

    /// Current reputation for a user.
    fn reputation(&self, user: &UserId) -> Result<i64, ContentError>;
}
