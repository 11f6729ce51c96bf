//! # End-to-End Scenarios
//!
//! The canonical vote/accept/notify flows, driven through the services and
//! observed through the dispatcher, exactly as a gateway caller would.

#[cfg(test)]
mod tests {
    use crate::integration::support::{next_notification, TestForum};
    use forum_content::{ContentError, ContentStore, ReputationStore, VoteTarget};
    use shared_types::{
        Identity, NotificationKind, VoteDirection, ACCEPTED_ANSWER_REPUTATION,
        NOTIFICATION_RETENTION_LIMIT,
    };

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const TITLE: &str = "How do I borrow twice?";
    const BODY: &str = "Full details of the borrowing problem.";

    // =============================================================================
    // SCENARIO: VOTE → NOTIFICATION
    // =============================================================================

    /// User B upvotes user A's question: score moves, a notification for A
    /// appears, and A's unread count reflects it.
    #[tokio::test]
    async fn test_upvote_notifies_question_author() {
        let forum = TestForum::start();
        let author = forum.register("author");
        let voter = forum.register("voter");

        let question = forum
            .container
            .authoring
            .post_question(&author, TITLE, BODY, vec!["rust".into()])
            .unwrap();

        let mut probe = forum.notification_probe();

        let outcome = forum
            .container
            .votes
            .apply_vote(&voter, VoteTarget::Question(question.id), VoteDirection::Up)
            .await
            .unwrap();
        assert!(outcome.cast);
        assert_eq!(outcome.score, 1);

        let stored = forum.container.content_store.question(&question.id).unwrap();
        assert!(stored.votes.upvoters.contains(&voter.user_id));

        let notification = next_notification(&mut probe).await;
        assert_eq!(notification.recipient, author.user_id);
        assert_eq!(notification.sender, voter.user_id);
        assert_eq!(notification.kind, NotificationKind::Upvote);
        assert_eq!(notification.refs.question_id, Some(question.id));

        assert_eq!(forum.container.dispatcher.unread_count(&author).unwrap(), 1);
    }

    /// Voting the same direction again retracts the vote and produces no new
    /// notification. A later vote from a third user acts as an ordering
    /// barrier proving the retraction was processed.
    #[tokio::test]
    async fn test_repeat_vote_retracts_without_notification() {
        let forum = TestForum::start();
        let author = forum.register("author");
        let voter = forum.register("voter");
        let other = forum.register("other");

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

        let outcome = forum
            .container
            .votes
            .apply_vote(&voter, VoteTarget::Question(question.id), VoteDirection::Up)
            .await
            .unwrap();
        assert!(!outcome.cast);
        assert_eq!(outcome.score, 0);

        let stored = forum.container.content_store.question(&question.id).unwrap();
        assert!(!stored.votes.upvoters.contains(&voter.user_id));
        assert!(!stored.votes.downvoters.contains(&voter.user_id));

        // Barrier: the next notification comes from `other`, not from the
        // retraction.
        forum
            .container
            .votes
            .apply_vote(&other, VoteTarget::Question(question.id), VoteDirection::Up)
            .await
            .unwrap();
        let barrier = next_notification(&mut probe).await;
        assert_eq!(barrier.sender, other.user_id);

        assert_eq!(forum.container.dispatcher.unread_count(&author).unwrap(), 2);
    }

    /// A self-vote counts toward the score but never notifies.
    #[tokio::test]
    async fn test_self_vote_is_counted_but_not_notified() {
        let forum = TestForum::start();
        let author = forum.register("author");
        let other = forum.register("other");

        let question = forum
            .container
            .authoring
            .post_question(&author, TITLE, BODY, vec![])
            .unwrap();
        let answer = forum
            .container
            .authoring
            .post_answer(&author, question.id, "Answering my own question.")
            .unwrap();

        let mut probe = forum.notification_probe();

        let outcome = forum
            .container
            .votes
            .apply_vote(&author, VoteTarget::Answer(answer.id), VoteDirection::Up)
            .await
            .unwrap();
        assert_eq!(outcome.score, 1);

        // Barrier: only the third-party vote notifies.
        forum
            .container
            .votes
            .apply_vote(&other, VoteTarget::Answer(answer.id), VoteDirection::Up)
            .await
            .unwrap();
        let barrier = next_notification(&mut probe).await;
        assert_eq!(barrier.sender, other.user_id);

        assert_eq!(forum.container.dispatcher.unread_count(&author).unwrap(), 1);
    }

    /// Switching direction moves the score by two and leaves the voter only
    /// in the new set.
    #[tokio::test]
    async fn test_switch_direction_moves_score_by_two() {
        let forum = TestForum::start();
        let author = forum.register("author");
        let voter = forum.register("voter");

        let question = forum
            .container
            .authoring
            .post_question(&author, TITLE, BODY, vec![])
            .unwrap();

        forum
            .container
            .votes
            .apply_vote(&voter, VoteTarget::Question(question.id), VoteDirection::Up)
            .await
            .unwrap();
        let outcome = forum
            .container
            .votes
            .apply_vote(&voter, VoteTarget::Question(question.id), VoteDirection::Down)
            .await
            .unwrap();

        assert_eq!(outcome.score, -1);
        let stored = forum.container.content_store.question(&question.id).unwrap();
        assert!(!stored.votes.upvoters.contains(&voter.user_id));
        assert!(stored.votes.downvoters.contains(&voter.user_id));
    }

    // =============================================================================
    // SCENARIO: ACCEPTANCE
    // =============================================================================

    /// Accepting an answer marks it, grants reputation and notifies the
    /// answer's author.
    #[tokio::test]
    async fn test_accept_marks_grants_and_notifies() {
        let forum = TestForum::start();
        let asker = forum.register("asker");
        let answerer = forum.register("answerer");

        let question = forum
            .container
            .authoring
            .post_question(&asker, TITLE, BODY, vec![])
            .unwrap();
        let answer = forum
            .container
            .authoring
            .post_answer(&answerer, question.id, "Use split_at_mut.")
            .unwrap();

        let mut probe = forum.notification_probe();

        forum
            .container
            .acceptance
            .accept(&asker, &question.id, &answer.id)
            .await
            .unwrap();

        let stored_question = forum.container.content_store.question(&question.id).unwrap();
        assert_eq!(stored_question.accepted_answer_id, Some(answer.id));

        let stored_answer = forum.container.content_store.answer(&answer.id).unwrap();
        assert!(stored_answer.is_accepted);
        assert_eq!(stored_answer.accepted_by, Some(asker.user_id));

        assert_eq!(
            forum
                .container
                .reputation_store
                .reputation(&answerer.user_id)
                .unwrap(),
            1 + ACCEPTED_ANSWER_REPUTATION
        );

        let notification = next_notification(&mut probe).await;
        assert_eq!(notification.recipient, answerer.user_id);
        assert_eq!(notification.sender, asker.user_id);
        assert_eq!(notification.kind, NotificationKind::Accepted);
    }

    /// Accepting your own answer still grants reputation but the
    /// notification is suppressed.
    #[tokio::test]
    async fn test_accept_own_answer_suppresses_notification() {
        let forum = TestForum::start();
        let asker = forum.register("asker");
        let other = forum.register("other");

        let question = forum
            .container
            .authoring
            .post_question(&asker, TITLE, BODY, vec![])
            .unwrap();
        let answer = forum
            .container
            .authoring
            .post_answer(&asker, question.id, "Solved it myself.")
            .unwrap();

        let mut probe = forum.notification_probe();

        forum
            .container
            .acceptance
            .accept(&asker, &question.id, &answer.id)
            .await
            .unwrap();

        assert_eq!(
            forum
                .container
                .reputation_store
                .reputation(&asker.user_id)
                .unwrap(),
            1 + ACCEPTED_ANSWER_REPUTATION
        );

        // Barrier: an unrelated vote proves the acceptance event was already
        // consumed without creating a record.
        forum
            .container
            .votes
            .apply_vote(&other, VoteTarget::Question(question.id), VoteDirection::Up)
            .await
            .unwrap();
        let barrier = next_notification(&mut probe).await;
        assert_eq!(barrier.kind, NotificationKind::Upvote);

        assert_eq!(forum.container.dispatcher.unread_count(&asker).unwrap(), 1);
    }

    /// Accepting a second answer unmarks the first; the question never holds
    /// two accepted answers.
    #[tokio::test]
    async fn test_reacceptance_keeps_single_accepted_answer() {
        let forum = TestForum::start();
        let asker = forum.register("asker");
        let first_answerer = forum.register("first");
        let second_answerer = forum.register("second");

        let question = forum
            .container
            .authoring
            .post_question(&asker, TITLE, BODY, vec![])
            .unwrap();
        let first = forum
            .container
            .authoring
            .post_answer(&first_answerer, question.id, "First attempt.")
            .unwrap();
        let second = forum
            .container
            .authoring
            .post_answer(&second_answerer, question.id, "Better attempt.")
            .unwrap();

        forum
            .container
            .acceptance
            .accept(&asker, &question.id, &first.id)
            .await
            .unwrap();
        forum
            .container
            .acceptance
            .accept(&asker, &question.id, &second.id)
            .await
            .unwrap();

        let stored_question = forum.container.content_store.question(&question.id).unwrap();
        assert_eq!(stored_question.accepted_answer_id, Some(second.id));
        assert!(!forum.container.content_store.answer(&first.id).unwrap().is_accepted);
        assert!(forum.container.content_store.answer(&second.id).unwrap().is_accepted);
    }

    /// Acceptance by anyone but the question's author is forbidden.
    #[tokio::test]
    async fn test_accept_requires_question_author() {
        let forum = TestForum::start();
        let asker = forum.register("asker");
        let answerer = forum.register("answerer");

        let question = forum
            .container
            .authoring
            .post_question(&asker, TITLE, BODY, vec![])
            .unwrap();
        let answer = forum
            .container
            .authoring
            .post_answer(&answerer, question.id, "An answer.")
            .unwrap();

        let err = forum
            .container
            .acceptance
            .accept(&answerer, &question.id, &answer.id)
            .await
            .unwrap_err();
        assert!(matches!(err, ContentError::NotQuestionAuthor { .. }));
    }

    // =============================================================================
    // SCENARIO: COMMENTS
    // =============================================================================

    /// Commenting on someone's question notifies the question author with a
    /// comment-kind record carrying full refs.
    #[tokio::test]
    async fn test_comment_notifies_parent_author() {
        let forum = TestForum::start();
        let asker = forum.register("asker");
        let commenter = forum.register("commenter");

        let question = forum
            .container
            .authoring
            .post_question(&asker, TITLE, BODY, vec![])
            .unwrap();

        let mut probe = forum.notification_probe();

        let comment = forum
            .container
            .comments
            .post_comment(&commenter, question.id, None, "Could you add an example?")
            .await
            .unwrap();

        let notification = next_notification(&mut probe).await;
        assert_eq!(notification.recipient, asker.user_id);
        assert_eq!(notification.kind, NotificationKind::Comment);
        assert_eq!(notification.refs.comment_id, Some(comment.id));
        assert_eq!(notification.refs.question_id, Some(question.id));
    }

    // =============================================================================
    // SCENARIO: RETENTION
    // =============================================================================

    /// 105 distinct voters target one author's question: exactly 100 records
    /// remain and they are the 100 most recent.
    #[tokio::test]
    async fn test_retention_keeps_hundred_most_recent() {
        let forum = TestForum::start();
        let author = forum.register("author");

        let question = forum
            .container
            .authoring
            .post_question(&author, TITLE, BODY, vec![])
            .unwrap();

        let mut probe = forum.notification_probe();

        let mut senders = Vec::new();
        for i in 0..105 {
            let voter = forum.register(&format!("voter-{i}"));
            senders.push(voter.user_id);
            forum
                .container
                .votes
                .apply_vote(&voter, VoteTarget::Question(question.id), VoteDirection::Up)
                .await
                .unwrap();
            next_notification(&mut probe).await;
        }

        let page = forum
            .container
            .dispatcher
            .list(&author, 1, 200)
            .unwrap();
        assert_eq!(page.notifications.len(), NOTIFICATION_RETENTION_LIMIT);
        assert_eq!(page.unread_count, NOTIFICATION_RETENTION_LIMIT);

        // The five oldest senders were evicted; the newest survives.
        let stored_senders: Vec<_> = page.notifications.iter().map(|n| n.sender).collect();
        for evicted in &senders[..5] {
            assert!(!stored_senders.contains(evicted));
        }
        for kept in &senders[5..] {
            assert!(stored_senders.contains(kept));
        }
    }

    // =============================================================================
    // SCENARIO: READ STATE
    // =============================================================================

    /// Read transitions are recipient-only and mark-all clears the unread
    /// count.
    #[tokio::test]
    async fn test_read_transitions_are_recipient_only() {
        let forum = TestForum::start();
        let author = forum.register("author");

        let question = forum
            .container
            .authoring
            .post_question(&author, TITLE, BODY, vec![])
            .unwrap();

        let mut probe = forum.notification_probe();
        for i in 0..3 {
            let voter = forum.register(&format!("voter-{i}"));
            forum
                .container
                .votes
                .apply_vote(&voter, VoteTarget::Question(question.id), VoteDirection::Up)
                .await
                .unwrap();
            next_notification(&mut probe).await;
        }

        let first = forum
            .container
            .dispatcher
            .list(&author, 1, 1)
            .unwrap()
            .notifications
            .remove(0);

        let stranger = Identity::user(shared_types::UserId::new());
        assert!(forum
            .container
            .dispatcher
            .mark_read(&first.id, &stranger)
            .is_err());

        forum
            .container
            .dispatcher
            .mark_read(&first.id, &author)
            .unwrap();
        assert_eq!(forum.container.dispatcher.unread_count(&author).unwrap(), 2);

        forum.container.dispatcher.mark_all_read(&author).unwrap();
        assert_eq!(forum.container.dispatcher.unread_count(&author).unwrap(), 0);
    }

    /// Votes against deleted content are rejected with not-found.
    #[tokio::test]
    async fn test_deleted_content_is_not_votable() {
        let forum = TestForum::start();
        let author = forum.register("author");
        let voter = forum.register("voter");

        let question = forum
            .container
            .authoring
            .post_question(&author, TITLE, BODY, vec![])
            .unwrap();
        forum
            .container
            .authoring
            .delete_question(&question.id)
            .unwrap();

        let err = forum
            .container
            .votes
            .apply_vote(&voter, VoteTarget::Question(question.id), VoteDirection::Up)
            .await
            .unwrap_err();
        assert!(matches!(err, ContentError::QuestionNotFound(_)));
    }
}
