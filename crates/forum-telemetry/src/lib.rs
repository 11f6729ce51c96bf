//! # Forum Telemetry
//!
//! Observability plumbing for the forum core.
//!
//! ## Components
//!
//! - Structured logging via `tracing` with an env-filter, plain or JSON
//!   formatted for log aggregation.
//! - Prometheus counters for votes, acceptances, notifications and push
//!   delivery.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use forum_telemetry::{init_tracing, TelemetryConfig};
//!
//! fn main() {
//!     let config = TelemetryConfig::from_env();
//!     init_tracing(&config).expect("Failed to init tracing");
//!     // Application code; logs and metrics are now being collected.
//! }
//! ```

mod config;
mod metrics;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use metrics::{
    gather_metrics, register_metrics, ANSWERS_ACCEPTED, NOTIFICATIONS_CREATED,
    NOTIFICATIONS_EVICTED, NOTIFICATIONS_SUPPRESSED, PUSH_DELIVERED, PUSH_MISSED, VOTES_CAST,
    VOTES_RETRACTED,
};
pub use tracing_setup::init_tracing;

use thiserror::Error;

/// Telemetry initialization errors.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The tracing subscriber was already installed.
    #[error("Tracing already initialized: {0}")]
    AlreadyInitialized(String),

    /// Metric registration failed.
    #[error("Metrics error: {0}")]
    Metrics(String),
}
