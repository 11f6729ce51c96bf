//! # Push Delivery Handler
//!
//! Forwards persisted notifications to their recipient's mailbox channel and
//! mirrors vote activity into the per-question rooms.
//!
//! Delivery is purely additive over the persisted store: a recipient with no
//! connected session simply misses the push and finds the record on the next
//! fetch.

use forum_push::{PushChannel, PushPayload, RoomKey};
use forum_telemetry::{PUSH_DELIVERED, PUSH_MISSED};
use shared_bus::{ForumEvent, Subscription};
use std::sync::Arc;
use tracing::info;

/// Bus consumer feeding the push channel.
pub struct PushDeliveryHandler {
    subscription: Subscription,
    push: Arc<PushChannel>,
}

impl PushDeliveryHandler {
    /// Create a handler over an existing subscription.
    pub fn new(subscription: Subscription, push: Arc<PushChannel>) -> Self {
        Self { subscription, push }
    }

    /// Run the handler loop until the bus closes.
    pub async fn run(mut self) {
        info!("Push delivery handler started");

        while let Some(event) = self.subscription.recv().await {
            self.handle(event);
        }

        info!("Push delivery handler stopped (bus closed)");
    }

    fn handle(&self, event: ForumEvent) {
        match event {
            ForumEvent::NotificationCreated(notification) => {
                let recipient = notification.recipient;
                let delivered = self
                    .push
                    .publish(&recipient, PushPayload::Notification(notification));
                if delivered > 0 {
                    PUSH_DELIVERED.inc();
                } else {
                    PUSH_MISSED.inc();
                }
            }

            // Live score updates for sessions viewing the question.
            ForumEvent::QuestionVoted {
                question_id, score, ..
            } => {
                self.push.broadcast_room(
                    &RoomKey::question(question_id),
                    PushPayload::QuestionActivity {
                        question_id,
                        body: serde_json::json!({
                            "kind": "question_score",
                            "score": score,
                        }),
                    },
                );
            }

            ForumEvent::AnswerVoted {
                question_id,
                answer_id,
                score,
                ..
            } => {
                self.push.broadcast_room(
                    &RoomKey::question(question_id),
                    PushPayload::QuestionActivity {
                        question_id,
                        body: serde_json::json!({
                            "kind": "answer_score",
                            "answer_id": answer_id,
                            "score": score,
                        }),
                    },
                );
            }

            ForumEvent::AnswerAccepted {
                question_id,
                answer_id,
                ..
            } => {
                self.push.broadcast_room(
                    &RoomKey::question(question_id),
                    PushPayload::QuestionActivity {
                        question_id,
                        body: serde_json::json!({
                            "kind": "answer_accepted",
                            "answer_id": answer_id,
                        }),
                    },
                );
            }

            ForumEvent::CommentPosted { .. } => {}
        }
    }
}
