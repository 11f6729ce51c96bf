//! # Content Use-Case Services
//!
//! Orchestrate store mutations into operations callable from the gateway
//! layer, and publish choreography events after each mutation commits.
//!
//! Event publishing is fire-and-forget: notification fan-out and push
//! delivery are consumed downstream, and their absence or failure never
//! fails the primary operation here.

use crate::domain::errors::ContentError;
use crate::domain::ledger::VoteOutcome;
use crate::ports::store::{AcceptOutcome, ContentStore, ReputationStore};
use shared_bus::{EventPublisher, ForumEvent, VoteAction};
use shared_types::{
    Answer, AnswerId, Comment, Identity, Question, QuestionId, VoteDirection,
    ACCEPTED_ANSWER_REPUTATION,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Bounds applied to a question title, matching the public form contract.
const TITLE_MIN: usize = 10;
const TITLE_MAX: usize = 150;

/// Minimum question body length.
const BODY_MIN: usize = 20;

/// The entity a vote targets. The toggle algorithm is shared; only the
/// lookup differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteTarget {
    /// Vote on a question.
    Question(QuestionId),
    /// Vote on an answer.
    Answer(AnswerId),
}

/// Applies vote toggles and publishes vote events.
pub struct VoteService {
    store: Arc<dyn ContentStore>,
    bus: Arc<dyn EventPublisher>,
}

impl VoteService {
    /// Create a new vote service.
    pub fn new(store: Arc<dyn ContentStore>, bus: Arc<dyn EventPublisher>) -> Self {
        Self { store, bus }
    }

    /// Apply one user's vote toggle to a question or answer.
    ///
    /// Returns the updated outcome (cast vs retracted, new score). The
    /// matching `QuestionVoted`/`AnswerVoted` event is published after the
    /// mutation commits; retractions publish too so live question rooms can
    /// refresh scores, but only casts drive notifications downstream.
    pub async fn apply_vote(
        &self,
        identity: &Identity,
        target: VoteTarget,
        direction: VoteDirection,
    ) -> Result<VoteOutcome, ContentError> {
        let voter = identity.user_id;

        let (outcome, event) = match target {
            VoteTarget::Question(question_id) => {
                let outcome = self.store.vote_question(&question_id, voter, direction)?;
                let event = ForumEvent::QuestionVoted {
                    question_id,
                    author: outcome.author,
                    voter,
                    direction,
                    action: action_of(&outcome),
                    score: outcome.score,
                };
                (outcome, event)
            }
            VoteTarget::Answer(answer_id) => {
                let vote = self.store.vote_answer(&answer_id, voter, direction)?;
                let event = ForumEvent::AnswerVoted {
                    answer_id,
                    question_id: vote.question_id,
                    author: vote.outcome.author,
                    voter,
                    direction,
                    action: action_of(&vote.outcome),
                    score: vote.outcome.score,
                };
                (vote.outcome, event)
            }
        };

        debug!(
            voter = %voter,
            direction = ?direction,
            cast = outcome.cast,
            score = outcome.score,
            "Vote toggled"
        );
        self.bus.publish(event).await;

        Ok(outcome)
    }
}

/// Applies acceptance transitions, grants reputation and publishes
/// `AnswerAccepted`.
pub struct AcceptanceService {
    store: Arc<dyn ContentStore>,
    reputation: Arc<dyn ReputationStore>,
    bus: Arc<dyn EventPublisher>,
}

impl AcceptanceService {
    /// Create a new acceptance service.
    pub fn new(
        store: Arc<dyn ContentStore>,
        reputation: Arc<dyn ReputationStore>,
        bus: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            store,
            reputation,
            bus,
        }
    }

    /// Accept an answer on behalf of the acting user.
    ///
    /// Only the question's author may accept; the answer must belong to the
    /// question. Accepting a new answer unmarks the previous one in the same
    /// transition. The answer's author is granted the acceptance reputation
    /// bonus; each adjustment is an independent, immediately-persisted step
    /// with no rollback, so a failed grant is logged rather than un-accepting.
    pub async fn accept(
        &self,
        identity: &Identity,
        question_id: &QuestionId,
        answer_id: &AnswerId,
    ) -> Result<AcceptOutcome, ContentError> {
        let outcome = self
            .store
            .accept_answer(question_id, answer_id, identity.user_id)?;

        if let Err(error) = self
            .reputation
            .adjust(&outcome.answer_author, ACCEPTED_ANSWER_REPUTATION)
        {
            warn!(
                user = %outcome.answer_author,
                error = %error,
                "Reputation grant failed after acceptance"
            );
        }

        self.bus
            .publish(ForumEvent::AnswerAccepted {
                question_id: outcome.question_id,
                answer_id: outcome.answer_id,
                answer_author: outcome.answer_author,
                accepted_by: outcome.accepted_by,
                previous: outcome.previous,
            })
            .await;

        Ok(outcome)
    }
}

/// Posts comments and publishes `CommentPosted`.
pub struct CommentService {
    store: Arc<dyn ContentStore>,
    bus: Arc<dyn EventPublisher>,
}

impl CommentService {
    /// Create a new comment service.
    pub fn new(store: Arc<dyn ContentStore>, bus: Arc<dyn EventPublisher>) -> Self {
        Self { store, bus }
    }

    /// Post a comment on a question, or on an answer when `answer_id` is set.
    pub async fn post_comment(
        &self,
        identity: &Identity,
        question_id: QuestionId,
        answer_id: Option<AnswerId>,
        body: impl Into<String>,
    ) -> Result<Comment, ContentError> {
        let body = body.into();
        if body.trim().is_empty() {
            return Err(ContentError::Validation(
                "comment body must not be empty".into(),
            ));
        }

        let comment = match answer_id {
            Some(answer_id) => {
                Comment::on_answer(identity.user_id, question_id, answer_id, body)
            }
            None => Comment::on_question(identity.user_id, question_id, body),
        };

        let parent_author = self.store.insert_comment(comment.clone())?;

        self.bus
            .publish(ForumEvent::CommentPosted {
                comment_id: comment.id,
                question_id,
                answer_id,
                parent_author,
                commenter: identity.user_id,
            })
            .await;

        Ok(comment)
    }
}

/// Creates and soft-deletes content. Creation feeds the stores the vote and
/// acceptance operations act on; no events fan out from authoring itself.
pub struct AuthoringService {
    store: Arc<dyn ContentStore>,
}

impl AuthoringService {
    /// Create a new authoring service.
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self { store }
    }

    /// Post a new question.
    pub fn post_question(
        &self,
        identity: &Identity,
        title: impl Into<String>,
        body: impl Into<String>,
        tags: Vec<String>,
    ) -> Result<Question, ContentError> {
        let title = title.into();
        let body = body.into();

        if title.len() < TITLE_MIN || title.len() > TITLE_MAX {
            return Err(ContentError::Validation(format!(
                "title must be between {TITLE_MIN} and {TITLE_MAX} characters"
            )));
        }
        if body.len() < BODY_MIN {
            return Err(ContentError::Validation(format!(
                "body must be at least {BODY_MIN} characters"
            )));
        }

        let mut question = Question::new(identity.user_id, title, body);
        question.tags = tags
            .into_iter()
            .map(|tag| tag.trim().to_lowercase())
            .filter(|tag| !tag.is_empty())
            .collect();

        self.store.insert_question(question.clone())?;
        Ok(question)
    }

    /// Post a new answer to a question.
    pub fn post_answer(
        &self,
        identity: &Identity,
        question_id: QuestionId,
        body: impl Into<String>,
    ) -> Result<Answer, ContentError> {
        let body = body.into();
        if body.trim().is_empty() {
            return Err(ContentError::Validation(
                "answer body must not be empty".into(),
            ));
        }

        let answer = Answer::new(question_id, identity.user_id, body);
        self.store.insert_answer(answer.clone())?;
        Ok(answer)
    }

    /// Soft-delete an answer, keeping the question's live answer count exact.
    pub fn delete_answer(&self, id: &AnswerId) -> Result<(), ContentError> {
        self.store.soft_delete_answer(id)
    }

    /// Soft-delete a question.
    pub fn delete_question(&self, id: &QuestionId) -> Result<(), ContentError> {
        self.store.soft_delete_question(id)
    }
}

fn action_of(outcome: &VoteOutcome) -> VoteAction {
    if outcome.cast {
        VoteAction::Cast
    } else {
        VoteAction::Retracted
    }
}
