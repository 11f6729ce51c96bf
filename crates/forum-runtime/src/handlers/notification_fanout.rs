//! # Notification Fan-Out Handler
//!
//! Consumes vote, acceptance and comment events and turns the qualifying
//! ones into persisted notification records via the dispatcher.
//!
//! Failures here are absorbed: the triggering vote/accept/comment already
//! succeeded, so a failed notification write is logged and counted, never
//! propagated.

use forum_notifications::NotificationDispatcher;
use forum_telemetry::{
    ANSWERS_ACCEPTED, NOTIFICATIONS_CREATED, NOTIFICATIONS_SUPPRESSED, VOTES_CAST, VOTES_RETRACTED,
};
use shared_bus::{ForumEvent, Subscription, VoteAction};
use shared_types::{ContentRefs, NotificationKind, UserId, VoteDirection};
use std::sync::Arc;
use tracing::{error, info};

/// Bus consumer creating notification records.
pub struct NotificationFanoutHandler {
    subscription: Subscription,
    dispatcher: Arc<NotificationDispatcher>,
}

impl NotificationFanoutHandler {
    /// Create a handler over an existing subscription.
    pub fn new(subscription: Subscription, dispatcher: Arc<NotificationDispatcher>) -> Self {
        Self {
            subscription,
            dispatcher,
        }
    }

    /// Run the handler loop until the bus closes.
    pub async fn run(mut self) {
        info!("Notification fan-out handler started");

        while let Some(event) = self.subscription.recv().await {
            self.handle(event).await;
        }

        info!("Notification fan-out handler stopped (bus closed)");
    }

    async fn handle(&self, event: ForumEvent) {
        match event {
            ForumEvent::QuestionVoted {
                question_id,
                author,
                voter,
                direction,
                action,
                ..
            } => {
                track_vote(action);
                if action == VoteAction::Cast {
                    self.notify(
                        author,
                        voter,
                        kind_for(direction),
                        ContentRefs::question(question_id),
                    )
                    .await;
                }
            }

            ForumEvent::AnswerVoted {
                answer_id,
                question_id,
                author,
                voter,
                direction,
                action,
                ..
            } => {
                track_vote(action);
                if action == VoteAction::Cast {
                    self.notify(
                        author,
                        voter,
                        kind_for(direction),
                        ContentRefs::answer(question_id, answer_id),
                    )
                    .await;
                }
            }

            ForumEvent::AnswerAccepted {
                question_id,
                answer_id,
                answer_author,
                accepted_by,
                ..
            } => {
                ANSWERS_ACCEPTED.inc();
                self.notify(
                    answer_author,
                    accepted_by,
                    NotificationKind::Accepted,
                    ContentRefs::answer(question_id, answer_id),
                )
                .await;
            }

            ForumEvent::CommentPosted {
                comment_id,
                question_id,
                answer_id,
                parent_author,
                commenter,
            } => {
                self.notify(
                    parent_author,
                    commenter,
                    NotificationKind::Comment,
                    ContentRefs::comment(question_id, answer_id, comment_id),
                )
                .await;
            }

            // Produced by this handler's own dispatcher; nothing to fan out.
            ForumEvent::NotificationCreated(_) => {}
        }
    }

    async fn notify(
        &self,
        recipient: UserId,
        sender: UserId,
        kind: NotificationKind,
        refs: ContentRefs,
    ) {
        match self.dispatcher.notify(recipient, sender, kind, refs).await {
            Ok(Some(_)) => NOTIFICATIONS_CREATED.inc(),
            Ok(None) => NOTIFICATIONS_SUPPRESSED.inc(),
            Err(err) => {
                // Best-effort: the triggering operation already succeeded.
                error!(
                    recipient = %recipient,
                    sender = %sender,
                    kind = kind.as_str(),
                    error = %err,
                    "Notification write failed"
                );
            }
        }
    }
}

fn kind_for(direction: VoteDirection) -> NotificationKind {
    match direction {
        VoteDirection::Up => NotificationKind::Upvote,
        VoteDirection::Down => NotificationKind::Downvote,
    }
}

fn track_vote(action: VoteAction) {
    match action {
        VoteAction::Cast => VOTES_CAST.inc(),
        VoteAction::Retracted => VOTES_RETRACTED.inc(),
    }
}
