//! # Handler Wiring
//!
//! Subscribes each handler to the topics it consumes and spawns the run
//! loops. Subscriptions are taken before this function returns, so events
//! published immediately afterwards are not lost.

use crate::container::AppContainer;
use crate::handlers::{NotificationFanoutHandler, PushDeliveryHandler};
use shared_bus::{EventFilter, EventTopic};
use tokio::task::JoinHandle;
use tracing::info;

/// Spawn the choreography handlers for an assembled container.
pub fn spawn_handlers(container: &AppContainer) -> Vec<JoinHandle<()>> {
    // Fan-out consumes the action topics; it ignores NotificationCreated.
    let fanout_sub = container.bus.subscribe(EventFilter::topics(vec![
        EventTopic::Votes,
        EventTopic::Acceptance,
        EventTopic::Comments,
    ]));
    let fanout =
        NotificationFanoutHandler::new(fanout_sub, container.dispatcher.clone());

    // Push consumes everything: notifications for mailboxes, vote and
    // acceptance activity for question rooms.
    let push_sub = container.bus.subscribe(EventFilter::all());
    let push = PushDeliveryHandler::new(push_sub, container.push.clone());

    info!("Choreography handlers wired");

    vec![tokio::spawn(fanout.run()), tokio::spawn(push.run())]
}
