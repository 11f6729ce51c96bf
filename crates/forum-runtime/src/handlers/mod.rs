//! Event handlers for the notification and push choreography.

pub mod notification_fanout;
pub mod push_delivery;

pub use notification_fanout::NotificationFanoutHandler;
pub use push_delivery::PushDeliveryHandler;
