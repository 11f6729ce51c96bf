//! # Push Delivery Flows
//!
//! Mailbox and room delivery through the full choreography: a content
//! mutation fans out into a persisted record, then reaches connected
//! sessions, or silently misses disconnected ones while the record stays
//! fetchable.

#[cfg(test)]
mod tests {
    use crate::integration::support::{next_notification, wait_until, TestForum};
    use forum_content::VoteTarget;
    use forum_push::{PushPayload, RoomKey};
    use shared_types::{NotificationKind, SessionId, VoteDirection};
    use std::time::Duration;
    use tokio::time::timeout;

    const TITLE: &str = "A push delivery question";
    const BODY: &str = "Where do live notifications come from?";

    /// A connected recipient receives the freshly persisted notification on
    /// their mailbox.
    #[tokio::test]
    async fn test_connected_recipient_receives_mailbox_push() {
        let forum = TestForum::start();
        let author = forum.register("author");
        let voter = forum.register("voter");

        let question = forum
            .container
            .authoring
            .post_question(&author, TITLE, BODY, vec![])
            .unwrap();

        let mut handle = forum
            .container
            .push
            .connect(SessionId::new(), &author)
            .unwrap();

        forum
            .container
            .votes
            .apply_vote(&voter, VoteTarget::Question(question.id), VoteDirection::Up)
            .await
            .unwrap();

        let payload = timeout(Duration::from_secs(1), handle.mailbox.recv())
            .await
            .expect("timed out waiting for mailbox push")
            .expect("mailbox closed");

        match payload {
            PushPayload::Notification(notification) => {
                assert_eq!(notification.recipient, author.user_id);
                assert_eq!(notification.kind, NotificationKind::Upvote);
            }
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    /// Multiple sessions of one user all receive the same push.
    #[tokio::test]
    async fn test_every_session_of_recipient_receives_push() {
        let forum = TestForum::start();
        let author = forum.register("author");
        let voter = forum.register("voter");

        let question = forum
            .container
            .authoring
            .post_question(&author, TITLE, BODY, vec![])
            .unwrap();

        let mut desktop = forum
            .container
            .push
            .connect(SessionId::new(), &author)
            .unwrap();
        let mut phone = forum
            .container
            .push
            .connect(SessionId::new(), &author)
            .unwrap();

        forum
            .container
            .votes
            .apply_vote(&voter, VoteTarget::Question(question.id), VoteDirection::Up)
            .await
            .unwrap();

        for mailbox in [&mut desktop.mailbox, &mut phone.mailbox] {
            let payload = timeout(Duration::from_secs(1), mailbox.recv())
                .await
                .expect("timed out waiting for mailbox push")
                .expect("mailbox closed");
            assert!(matches!(payload, PushPayload::Notification(_)));
        }
    }

    /// With no session connected the push is a counted miss, while the
    /// persisted record remains retrievable by fetch.
    #[tokio::test]
    async fn test_disconnected_recipient_keeps_persisted_record() {
        let forum = TestForum::start();
        let author = forum.register("author");
        let voter = forum.register("voter");

        let question = forum
            .container
            .authoring
            .post_question(&author, TITLE, BODY, vec![])
            .unwrap();

        let mut probe = forum.notification_probe();

        forum
            .container
            .votes
            .apply_vote(&voter, VoteTarget::Question(question.id), VoteDirection::Up)
            .await
            .unwrap();
        next_notification(&mut probe).await;

        // The push handler processes the event at its own pace.
        let push = forum.container.push.clone();
        wait_until(move || push.missed_count() > 0).await;

        assert_eq!(forum.container.dispatcher.unread_count(&author).unwrap(), 1);
        let page = forum.container.dispatcher.list(&author, 1, 20).unwrap();
        assert_eq!(page.notifications.len(), 1);
    }

    /// Sessions viewing a question receive live score activity through its
    /// room.
    #[tokio::test]
    async fn test_question_room_receives_vote_activity() {
        let forum = TestForum::start();
        let author = forum.register("author");
        let viewer = forum.register("viewer");
        let voter = forum.register("voter");

        let question = forum
            .container
            .authoring
            .post_question(&author, TITLE, BODY, vec![])
            .unwrap();

        let session_id = SessionId::new();
        let _handle = forum.container.push.connect(session_id, &viewer).unwrap();
        let mut room_rx = forum
            .container
            .push
            .join_room(&session_id, RoomKey::question(question.id))
            .unwrap();

        forum
            .container
            .votes
            .apply_vote(&voter, VoteTarget::Question(question.id), VoteDirection::Up)
            .await
            .unwrap();

        let payload = timeout(Duration::from_secs(1), room_rx.recv())
            .await
            .expect("timed out waiting for room activity")
            .expect("room closed");

        match payload {
            PushPayload::QuestionActivity {
                question_id, body, ..
            } => {
                assert_eq!(question_id, question.id);
                assert_eq!(body["kind"], "question_score");
                assert_eq!(body["score"], 1);
            }
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    /// Leaving the room stops the session's membership; the push channel
    /// itself keeps working for the mailbox.
    #[tokio::test]
    async fn test_leave_room_then_mailbox_still_delivers() {
        let forum = TestForum::start();
        let author = forum.register("author");
        let voter = forum.register("voter");

        let question = forum
            .container
            .authoring
            .post_question(&author, TITLE, BODY, vec![])
            .unwrap();

        let session_id = SessionId::new();
        let mut handle = forum.container.push.connect(session_id, &author).unwrap();
        let room = RoomKey::question(question.id);
        let room_rx = forum.container.push.join_room(&session_id, room).unwrap();
        drop(room_rx);
        assert!(forum.container.push.leave_room(&session_id, &room));

        forum
            .container
            .votes
            .apply_vote(&voter, VoteTarget::Question(question.id), VoteDirection::Up)
            .await
            .unwrap();

        let payload = timeout(Duration::from_secs(1), handle.mailbox.recv())
            .await
            .expect("timed out waiting for mailbox push")
            .expect("mailbox closed");
        assert!(matches!(payload, PushPayload::Notification(_)));
    }
}
