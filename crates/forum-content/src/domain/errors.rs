//! Error types for the content subsystem.

use shared_types::{AnswerId, QuestionId, UserId};
use thiserror::Error;

/// Errors surfaced by vote, acceptance and comment operations.
///
/// Soft-deleted content reports `QuestionNotFound`/`AnswerNotFound` rather
/// than a distinct state: deleted content is not votable and callers must
/// not be able to distinguish it from absent content.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentError {
    /// Question does not exist or is soft-deleted.
    #[error("Question not found: {0}")]
    QuestionNotFound(QuestionId),

    /// Answer does not exist or is soft-deleted.
    #[error("Answer not found: {0}")]
    AnswerNotFound(AnswerId),

    /// Only the question's author may accept an answer.
    #[error("User {user} is not the author of question {question}")]
    NotQuestionAuthor {
        /// The acting user.
        user: UserId,
        /// The question whose answer they tried to accept.
        question: QuestionId,
    },

    /// The answer is not an answer to the given question.
    #[error("Answer {answer} does not belong to question {question}")]
    AnswerNotForQuestion {
        /// The answer passed in.
        answer: AnswerId,
        /// The question it was checked against.
        question: QuestionId,
    },

    /// A create/comment payload failed validation.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The persistence layer failed.
    #[error("Storage error: {0}")]
    Storage(String),
}
