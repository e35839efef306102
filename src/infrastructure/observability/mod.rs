//! Push-based observability for perfpulse
//!
//! Metrics leave the process only by being pushed to a Prometheus
//! Pushgateway; nothing is served or scraped.

pub mod metrics;
pub mod pushgateway;

pub use metrics::IterationRegistry;
pub use pushgateway::PushGatewayPublisher;
