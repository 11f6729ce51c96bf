//! Prometheus metrics for the forum core.
//!
//! All metrics follow the naming convention: `forum_<subsystem>_<metric>_<unit>`

use lazy_static::lazy_static;
use prometheus::{Counter, Encoder, Registry, TextEncoder};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // CONTENT METRICS
    // =========================================================================

    /// Votes cast (new or switched direction)
    pub static ref VOTES_CAST: Counter = Counter::new(
        "forum_content_votes_cast_total",
        "Total votes cast on questions and answers"
    ).expect("metric creation failed");

    /// Votes retracted (same-direction toggle off)
    pub static ref VOTES_RETRACTED: Counter = Counter::new(
        "forum_content_votes_retracted_total",
        "Total votes retracted from questions and answers"
    ).expect("metric creation failed");

    /// Answers accepted
    pub static ref ANSWERS_ACCEPTED: Counter = Counter::new(
        "forum_content_answers_accepted_total",
        "Total answer acceptance transitions"
    ).expect("metric creation failed");

    // =========================================================================
    // NOTIFICATION METRICS
    // =========================================================================

    /// Notification records persisted
    pub static ref NOTIFICATIONS_CREATED: Counter = Counter::new(
        "forum_notifications_created_total",
        "Total notification records persisted"
    ).expect("metric creation failed");

    /// Notifications suppressed because actor == recipient
    pub static ref NOTIFICATIONS_SUPPRESSED: Counter = Counter::new(
        "forum_notifications_suppressed_total",
        "Total self-action notifications suppressed"
    ).expect("metric creation failed");

    /// Notifications evicted by the retention cap
    pub static ref NOTIFICATIONS_EVICTED: Counter = Counter::new(
        "forum_notifications_evicted_total",
        "Total notifications evicted by the per-recipient retention cap"
    ).expect("metric creation failed");

    // =========================================================================
    // PUSH METRICS
    // =========================================================================

    /// Push payloads delivered to at least one live session
    pub static ref PUSH_DELIVERED: Counter = Counter::new(
        "forum_push_delivered_total",
        "Total push payloads delivered to a connected session"
    ).expect("metric creation failed");

    /// Push payloads dropped because the recipient was not connected
    pub static ref PUSH_MISSED: Counter = Counter::new(
        "forum_push_missed_total",
        "Total push payloads dropped with no connected session"
    ).expect("metric creation failed");
}

/// Register all metrics with the global registry.
///
/// Call once at startup; duplicate registration reports an error.
pub fn register_metrics() -> Result<(), TelemetryError> {
    let metrics: [&Counter; 8] = [
        &VOTES_CAST,
        &VOTES_RETRACTED,
        &ANSWERS_ACCEPTED,
        &NOTIFICATIONS_CREATED,
        &NOTIFICATIONS_SUPPRESSED,
        &NOTIFICATIONS_EVICTED,
        &PUSH_DELIVERED,
        &PUSH_MISSED,
    ];

    for metric in metrics {
        REGISTRY
            .register(Box::new(metric.clone()))
            .map_err(|e| TelemetryError::Metrics(e.to_string()))?;
    }
    Ok(())
}

/// Encode all registered metrics in the Prometheus text format.
pub fn gather_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder
        .encode(&REGISTRY.gather(), &mut buffer)
        .map_err(|e| TelemetryError::Metrics(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::Metrics(e.to_string()))
}
