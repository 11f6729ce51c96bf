//! # Integration Tests
//!
//! Cross-subsystem flows through the shared bus: a vote/accept/comment
//! mutation in `forum-content`, notification fan-out in
//! `forum-notifications`, and push delivery in `forum-push`, wired exactly
//! as the runtime wires them.

pub mod concurrency;
pub mod push_flows;
pub mod scenarios;

pub(crate) mod support {
    use forum_content::ReputationStore;
    use forum_runtime::{spawn_handlers, AppContainer, RuntimeConfig};
    use shared_bus::{EventFilter, EventTopic, ForumEvent, Subscription};
    use shared_types::{Identity, Notification, UserAccount};
    use std::time::Duration;
    use tokio::task::JoinHandle;
    use tokio::time::timeout;

    /// A fully wired forum core with running choreography handlers.
    pub struct TestForum {
        pub container: AppContainer,
        handlers: Vec<JoinHandle<()>>,
    }

    impl TestForum {
        /// Build the container and spawn the handlers, as the runtime does.
        pub fn start() -> Self {
            let container = AppContainer::build(&RuntimeConfig::default());
            let handlers = spawn_handlers(&container);
            Self {
                container,
                handlers,
            }
        }

        /// Register an account and return its identity.
        pub fn register(&self, username: &str) -> Identity {
            let account = UserAccount::new(username);
            let identity = Identity::user(account.id);
            self.container
                .reputation_store
                .insert_account(account)
                .expect("account insert");
            identity
        }

        /// Subscribe to persisted-notification events.
        ///
        /// Taking the subscription before acting guarantees no event is
        /// missed.
        pub fn notification_probe(&self) -> Subscription {
            self.container
                .bus
                .subscribe(EventFilter::topics(vec![EventTopic::Notifications]))
        }
    }

    impl Drop for TestForum {
        fn drop(&mut self) {
            for handle in &self.handlers {
                handle.abort();
            }
        }
    }

    /// Await the next persisted notification, with a deadline.
    pub async fn next_notification(probe: &mut Subscription) -> Notification {
        let event = timeout(Duration::from_secs(1), probe.recv())
            .await
            .expect("timed out waiting for a notification event")
            .expect("bus closed while waiting for a notification event");

        match event {
            ForumEvent::NotificationCreated(notification) => notification,
            other => panic!("unexpected event on notification probe: {other:?}"),
        }
    }

    /// Poll a condition until it holds, with a deadline.
    pub async fn wait_until(mut condition: impl FnMut() -> bool) {
        timeout(Duration::from_secs(1), async {
            while !condition() {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("timed out waiting for condition");
    }
}
