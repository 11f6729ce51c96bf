//! # Service Container
//!
//! Builds every subsystem with its dependencies injected and hands the
//! assembled services to the wiring layer.

use forum_content::{
    AcceptanceService, AuthoringService, CommentService, InMemoryContentStore,
    InMemoryReputationStore, VoteService,
};
use forum_notifications::{InMemoryNotificationStore, NotificationDispatcher};
use forum_push::PushChannel;
use shared_bus::InMemoryEventBus;
use shared_types::NOTIFICATION_RETENTION_LIMIT;
use std::env;
use std::sync::Arc;
use tracing::info;

/// Runtime knobs read from the environment.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Per-recipient notification retention ceiling.
    pub notification_retention: usize,
    /// Max question rooms one session may join.
    pub max_rooms_per_session: u32,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            notification_retention: NOTIFICATION_RETENTION_LIMIT,
            max_rooms_per_session: forum_push::MAX_ROOMS_PER_SESSION,
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults.
    ///
    /// # Environment Variables
    ///
    /// - `FORUM_NOTIFICATION_RETENTION`: retention ceiling (default: 100)
    /// - `FORUM_MAX_ROOMS_PER_SESSION`: room limit (default: 32)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            notification_retention: env::var("FORUM_NOTIFICATION_RETENTION")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.notification_retention),
            max_rooms_per_session: env::var("FORUM_MAX_ROOMS_PER_SESSION")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_rooms_per_session),
        }
    }
}

/// All constructed subsystems, sharing one event bus.
pub struct AppContainer {
    /// The shared event bus.
    pub bus: Arc<InMemoryEventBus>,
    /// Content persistence.
    pub content_store: Arc<InMemoryContentStore>,
    /// Reputation persistence.
    pub reputation_store: Arc<InMemoryReputationStore>,
    /// Notification persistence.
    pub notification_store: Arc<InMemoryNotificationStore>,
    /// Real-time push registry.
    pub push: Arc<PushChannel>,
    /// Vote toggles.
    pub votes: Arc<VoteService>,
    /// Answer acceptance.
    pub acceptance: Arc<AcceptanceService>,
    /// Comment posting.
    pub comments: Arc<CommentService>,
    /// Content creation and soft-deletion.
    pub authoring: Arc<AuthoringService>,
    /// Notification creation and read state.
    pub dispatcher: Arc<NotificationDispatcher>,
}

impl AppContainer {
    /// Construct every subsystem against in-memory adapters.
    pub fn build(config: &RuntimeConfig) -> Self {
        let bus = Arc::new(InMemoryEventBus::new());
        let content_store = Arc::new(InMemoryContentStore::new());
        let reputation_store = Arc::new(InMemoryReputationStore::new());
        let notification_store = Arc::new(InMemoryNotificationStore::new());
        let push = Arc::new(PushChannel::with_room_limit(config.max_rooms_per_session));

        let votes = Arc::new(VoteService::new(content_store.clone(), bus.clone()));
        let acceptance = Arc::new(AcceptanceService::new(
            content_store.clone(),
            reputation_store.clone(),
            bus.clone(),
        ));
        let comments = Arc::new(CommentService::new(content_store.clone(), bus.clone()));
        let authoring = Arc::new(AuthoringService::new(content_store.clone()));
        let dispatcher = Arc::new(NotificationDispatcher::with_retention_cap(
            notification_store.clone(),
            bus.clone(),
            config.notification_retention,
        ));

        info!(
            retention = config.notification_retention,
            max_rooms = config.max_rooms_per_session,
            "Container assembled"
        );

        Self {
            bus,
            content_store,
            reputation_store,
            notification_store,
            push,
            votes,
            acceptance,
            comments,
            authoring,
            dispatcher,
        }
    }
}
