//! # Answer Acceptance
//!
//! State machine for a question's accepted-answer status.
//!
//! ## Invariants
//!
//! - Only the question's author may accept.
//! - The answer must belong to the question.
//! - At most one accepted answer per question at any time: accepting a new
//!   answer unmarks the previous one in the same transition.

use crate::domain::errors::ContentError;
use chrono::{DateTime, Utc};
use shared_types::{Answer, AnswerId, Question, UserId};

/// The committed part of an acceptance transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcceptTransition {
    /// The previously accepted answer that must be unmarked, if any.
    pub previous: Option<AnswerId>,
    /// The accepted answer's author (reputation beneficiary).
    pub answer_author: UserId,
}

/// Validate and apply an acceptance to the question and the target answer.
///
/// The caller holds both entities' critical sections and is responsible for
/// clearing the accepted flag on the `previous` answer returned here, so the
/// whole transition is observed atomically.
pub fn accept_answer(
    question: &mut Question,
    answer: &mut Answer,
    acting_user: UserId,
    at: DateTime<Utc>,
) -> Result<AcceptTransition, ContentError> {
    if acting_user != question.author {
        return Err(ContentError::NotQuestionAuthor {
            user: acting_user,
            question: question.id,
        });
    }

    if answer.question_id != question.id {
        return Err(ContentError::AnswerNotForQuestion {
            answer: answer.id,
            question: question.id,
        });
    }

    // Re-accepting the same answer is a no-op transition with no previous to
    // unmark.
    let previous = question
        .accepted_answer_id
        .filter(|prev| *prev != answer.id);

    question.accepted_answer_id = Some(answer.id);
    answer.mark_accepted(acting_user, at);

    Ok(AcceptTransition {
        previous,
        answer_author: answer.author,
    })
}
