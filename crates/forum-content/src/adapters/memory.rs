//! # In-Memory Store Adapters
//!
//! DashMap-backed implementations of the content and reputation ports.
//! Every mutation runs inside the target entry's shard lock, which gives the
//! per-entity read-modify-write atomicity the ports require. Operations that
//! touch a question and its answers acquire the question entry first, so
//! acceptance transitions on one question serialize while operations on
//! other entities proceed in parallel.

use crate::domain::acceptance;
use crate::domain::errors::ContentError;
use crate::domain::ledger::{toggle_vote, VoteOutcome};
use crate::domain::reputation;
use crate::ports::store::{AcceptOutcome, AnswerVote, ContentStore, ReputationStore};
use chrono::Utc;
use dashmap::DashMap;
use shared_types::{
    Answer, AnswerId, Comment, CommentId, Question, QuestionId, UserAccount, UserId, VoteDirection,
};
use tracing::debug;

/// In-memory implementation of [`ContentStore`].
#[derive(Default)]
pub struct InMemoryContentStore {
    questions: DashMap<QuestionId, Question>,
    answers: DashMap<AnswerId, Answer>,
    comments: DashMap<CommentId, Comment>,
}

impl InMemoryContentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored questions, including soft-deleted ones.
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// Number of stored answers, including soft-deleted ones.
    pub fn answer_count(&self) -> usize {
        self.answers.len()
    }
}

impl ContentStore for InMemoryContentStore {
    fn insert_question(&self, question: Question) -> Result<(), ContentError> {
        debug!(question_id = %question.id, author = %question.author, "Question stored");
        self.questions.insert(question.id, question);
        Ok(())
    }

    fn insert_answer(&self, answer: Answer) -> Result<(), ContentError> {
        // Question entry first: the counter update and the answer insert
        // commit under the question's lock.
        let mut question = self
            .questions
            .get_mut(&answer.question_id)
            .ok_or(ContentError::QuestionNotFound(answer.question_id))?;
        if question.is_deleted {
            return Err(ContentError::QuestionNotFound(answer.question_id));
        }

        question.answer_count += 1;
        debug!(
            answer_id = %answer.id,
            question_id = %answer.question_id,
            answer_count = question.answer_count,
            "Answer stored"
        );
        self.answers.insert(answer.id, answer);
        Ok(())
    }

    fn insert_comment(&self, comment: Comment) -> Result<UserId, ContentError> {
        let parent_author = match comment.answer_id {
            Some(answer_id) => {
                let answer = self
                    .answers
                    .get(&answer_id)
                    .ok_or(ContentError::AnswerNotFound(answer_id))?;
                if answer.is_deleted {
                    return Err(ContentError::AnswerNotFound(answer_id));
                }
                if answer.question_id != comment.question_id {
                    return Err(ContentError::AnswerNotForQuestion {
                        answer: answer_id,
                        question: comment.question_id,
                    });
                }
                answer.author
            }
            None => {
                let question = self
                    .questions
                    .get(&comment.question_id)
                    .ok_or(ContentError::QuestionNotFound(comment.question_id))?;
                if question.is_deleted {
                    return Err(ContentError::QuestionNotFound(comment.question_id));
                }
                question.author
            }
        };

        self.comments.insert(comment.id, comment);
        Ok(parent_author)
    }

    fn question(&self, id: &QuestionId) -> Result<Question, ContentError> {
        let question = self
            .questions
            .get(id)
            .ok_or(ContentError::QuestionNotFound(*id))?;
        if question.is_deleted {
            return Err(ContentError::QuestionNotFound(*id));
        }
        Ok(question.clone())
    }

    fn answer(&self, id: &AnswerId) -> Result<Answer, ContentError> {
        let answer = self
            .answers
            .get(id)
            .ok_or(ContentError::AnswerNotFound(*id))?;
        if answer.is_deleted {
            return Err(ContentError::AnswerNotFound(*id));
        }
        Ok(answer.clone())
    }

    fn vote_question(
        &self,
        id: &QuestionId,
        voter: UserId,
        direction: VoteDirection,
    ) -> Result<VoteOutcome, ContentError> {
        let mut question = self
            .questions
            .get_mut(id)
            .ok_or(ContentError::QuestionNotFound(*id))?;
        if question.is_deleted {
            return Err(ContentError::QuestionNotFound(*id));
        }

        Ok(toggle_vote(&mut *question, voter, direction))
    }

    fn vote_answer(
        &self,
        id: &AnswerId,
        voter: UserId,
        direction: VoteDirection,
    ) -> Result<AnswerVote, ContentError> {
        let mut answer = self
            .answers
            .get_mut(id)
            .ok_or(ContentError::AnswerNotFound(*id))?;
        if answer.is_deleted {
            return Err(ContentError::AnswerNotFound(*id));
        }

        let question_id = answer.question_id;
        let outcome = toggle_vote(&mut *answer, voter, direction);
        Ok(AnswerVote {
            outcome,
            question_id,
        })
    }

    fn accept_answer(
        &self,
        question_id: &QuestionId,
        answer_id: &AnswerId,
        acting_user: UserId,
    ) -> Result<AcceptOutcome, ContentError> {
        // The question entry is held for the whole transition; acceptances on
        // one question serialize here.
        let mut question = self
            .questions
            .get_mut(question_id)
            .ok_or(ContentError::QuestionNotFound(*question_id))?;
        if question.is_deleted {
            return Err(ContentError::QuestionNotFound(*question_id));
        }

        let transition = {
            let mut answer = self
                .answers
                .get_mut(answer_id)
                .ok_or(ContentError::AnswerNotFound(*answer_id))?;
            if answer.is_deleted {
                return Err(ContentError::AnswerNotFound(*answer_id));
            }

            acceptance::accept_answer(&mut *question, &mut *answer, acting_user, Utc::now())?
        };

        // Unmark the previously accepted answer after releasing the target
        // answer's entry; the question entry still guards the transition.
        if let Some(previous_id) = transition.previous {
            if let Some(mut previous) = self.answers.get_mut(&previous_id) {
                previous.clear_accepted();
            }
        }

        debug!(
            question_id = %question_id,
            answer_id = %answer_id,
            previous = ?transition.previous,
            "Answer accepted"
        );

        Ok(AcceptOutcome {
            question_id: *question_id,
            answer_id: *answer_id,
            answer_author: transition.answer_author,
            accepted_by: acting_user,
            previous: transition.previous,
        })
    }

    fn soft_delete_answer(&self, id: &AnswerId) -> Result<(), ContentError> {
        // Read the parent first so locks are always taken question-then-answer.
        let question_id = {
            let answer = self
                .answers
                .get(id)
                .ok_or(ContentError::AnswerNotFound(*id))?;
            if answer.is_deleted {
                return Err(ContentError::AnswerNotFound(*id));
            }
            answer.question_id
        };

        let mut question = self
            .questions
            .get_mut(&question_id)
            .ok_or(ContentError::QuestionNotFound(question_id))?;

        let mut answer = self
            .answers
            .get_mut(id)
            .ok_or(ContentError::AnswerNotFound(*id))?;
        if answer.is_deleted {
            // Lost a race with a concurrent delete.
            return Err(ContentError::AnswerNotFound(*id));
        }

        answer.is_deleted = true;
        question.answer_count = question.answer_count.saturating_sub(1);

        debug!(
            answer_id = %id,
            question_id = %question_id,
            answer_count = question.answer_count,
            "Answer soft-deleted"
        );
        Ok(())
    }

    fn soft_delete_question(&self, id: &QuestionId) -> Result<(), ContentError> {
        let mut question = self
            .questions
            .get_mut(id)
            .ok_or(ContentError::QuestionNotFound(*id))?;
        if question.is_deleted {
            return Err(ContentError::QuestionNotFound(*id));
        }

        question.is_deleted = true;
        Ok(())
    }
}

/// In-memory implementation of [`ReputationStore`].
#[derive(Default)]
pub struct InMemoryReputationStore {
    accounts: DashMap<UserId, UserAccount>,
}

impl InMemoryReputationStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReputationStore for InMemoryReputationStore {
    fn insert_account(&self, account: UserAccount) -> Result<(), ContentError> {
        self.accounts.insert(account.id, account);
        Ok(())
    }

    fn adjust(&self, user: &UserId, delta: i64) -> Result<i64, ContentError> {
        // Single critical section per account entry; concurrent adjustments
        // for one beneficiary all land.
        let mut account = self
            .accounts
            .get_mut(user)
            .ok_or_else(|| ContentError::Storage(format!("unknown account: {user}")))?;

        account.reputation = reputation::apply_delta(account.reputation, delta);
        debug!(user = %user, delta, reputation = account.reputation, "Reputation adjusted");
        Ok(account.reputation)
    }

    fn reputation(&self, user: &UserId) -> Result<i64, ContentError> {
        self.accounts
            .get(user)
            .map(|account| account.reputation)
            .ok_or_else(|| ContentError::Storage(format!("unknown account: {user}")))
    }
}
