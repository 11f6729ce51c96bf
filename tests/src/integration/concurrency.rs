//! # Concurrency Tests
//!
//! Parallel operations against shared entities: concurrent toggles on one
//! entity must all land, operations on different entities proceed
//! independently, and reputation adjustments never lose increments.

#[cfg(test)]
mod tests {
    use crate::integration::support::TestForum;
    use forum_content::{ContentStore, ReputationStore, VoteTarget};
    use shared_types::{VoteDirection, ACCEPTED_ANSWER_REPUTATION};
    use std::sync::Arc;

    const TITLE: &str = "A concurrency question";
    const BODY: &str = "What happens when everyone votes at once?";

    /// Fifty users upvote the same question concurrently; every vote lands.
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_upvotes_all_land() {
        let forum = Arc::new(TestForum::start());
        let author = forum.register("author");
        let question = forum
            .container
            .authoring
            .post_question(&author, TITLE, BODY, vec![])
            .unwrap();

        let mut tasks = Vec::new();
        for i in 0..50 {
            let forum = forum.clone();
            let voter = forum.register(&format!("voter-{i}"));
            tasks.push(tokio::spawn(async move {
                forum
                    .container
                    .votes
                    .apply_vote(&voter, VoteTarget::Question(question.id), VoteDirection::Up)
                    .await
                    .unwrap()
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        let stored = forum.container.content_store.question(&question.id).unwrap();
        assert_eq!(stored.votes.upvoters.len(), 50);
        assert_eq!(stored.votes.downvoters.len(), 0);
        assert_eq!(stored.votes.score(), 50);
    }

    /// Users holding upvotes concurrently switch to downvotes; afterwards
    /// each appears in exactly one set and the score matches.
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_switches_stay_mutually_exclusive() {
        let forum = Arc::new(TestForum::start());
        let author = forum.register("author");
        let question = forum
            .container
            .authoring
            .post_question(&author, TITLE, BODY, vec![])
            .unwrap();

        let voters: Vec<_> = (0..20)
            .map(|i| forum.register(&format!("voter-{i}")))
            .collect();
        for voter in &voters {
            forum
                .container
                .votes
                .apply_vote(voter, VoteTarget::Question(question.id), VoteDirection::Up)
                .await
                .unwrap();
        }

        let mut tasks = Vec::new();
        for voter in voters.clone() {
            let forum = forum.clone();
            tasks.push(tokio::spawn(async move {
                forum
                    .container
                    .votes
                    .apply_vote(&voter, VoteTarget::Question(question.id), VoteDirection::Down)
                    .await
                    .unwrap()
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        let stored = forum.container.content_store.question(&question.id).unwrap();
        assert_eq!(stored.votes.score(), -20);
        for voter in &voters {
            assert!(!stored.votes.upvoters.contains(&voter.user_id));
            assert!(stored.votes.downvoters.contains(&voter.user_id));
        }
    }

    /// Interleaved votes against two different questions do not disturb each
    /// other.
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_independent_entities_do_not_interfere() {
        let forum = Arc::new(TestForum::start());
        let author = forum.register("author");
        let first = forum
            .container
            .authoring
            .post_question(&author, TITLE, BODY, vec![])
            .unwrap();
        let second = forum
            .container
            .authoring
            .post_question(&author, "Another concurrency question", BODY, vec![])
            .unwrap();

        let mut tasks = Vec::new();
        for i in 0..30 {
            let forum = forum.clone();
            let voter = forum.register(&format!("voter-{i}"));
            let target = if i % 2 == 0 { first.id } else { second.id };
            tasks.push(tokio::spawn(async move {
                forum
                    .container
                    .votes
                    .apply_vote(&voter, VoteTarget::Question(target), VoteDirection::Up)
                    .await
                    .unwrap()
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        assert_eq!(
            forum
                .container
                .content_store
                .question(&first.id)
                .unwrap()
                .votes
                .score(),
            15
        );
        assert_eq!(
            forum
                .container
                .content_store
                .question(&second.id)
                .unwrap()
                .votes
                .score(),
            15
        );
    }

    /// Concurrent reputation grants for one beneficiary all land.
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_reputation_grants_accumulate() {
        let forum = Arc::new(TestForum::start());
        let beneficiary = forum.register("beneficiary");

        let mut tasks = Vec::new();
        for _ in 0..10 {
            let forum = forum.clone();
            let user = beneficiary.user_id;
            tasks.push(tokio::spawn(async move {
                forum
                    .container
                    .reputation_store
                    .adjust(&user, ACCEPTED_ANSWER_REPUTATION)
                    .unwrap()
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        assert_eq!(
            forum
                .container
                .reputation_store
                .reputation(&beneficiary.user_id)
                .unwrap(),
            1 + 10 * ACCEPTED_ANSWER_REPUTATION
        );
    }

    /// The floor holds under concurrent negative adjustments.
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_reputation_floor_holds_under_concurrency() {
        let forum = Arc::new(TestForum::start());
        let target = forum.register("target");
        forum
            .container
            .reputation_store
            .adjust(&target.user_id, 10)
            .unwrap();

        let mut tasks = Vec::new();
        for _ in 0..20 {
            let forum = forum.clone();
            let user = target.user_id;
            tasks.push(tokio::spawn(async move {
                forum.container.reputation_store.adjust(&user, -7).unwrap()
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        assert_eq!(
            forum
                .container
                .reputation_store
                .reputation(&target.user_id)
                .unwrap(),
            1
        );
    }
}
