use thiserror::Error;

/// Credential acquisition failures. Always fatal before the loop starts.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The primary source failed for a reason that must not trigger the fallback.
    #[error("Failed to load {source_name} credentials: {reason}")]
    Primary { source_name: String, reason: String },

    #[error("Failed to load {source_name} credentials after {primary_reason}: {reason}")]
    Fallback {
        source_name: String,
        primary_reason: String,
        reason: String,
    },

    #[error("Failed to build cluster client: {reason}")]
    Client { reason: String },
}

/// Orchestration API query failures.
#[derive(Debug, Error)]
pub enum SampleError {
    #[error("Failed to list pods in namespace {namespace}: {reason}")]
    ListFailed { namespace: String, reason: String },
}

/// Degenerate aggregation input, handled inside the iteration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AggregationError {
    #[error("No terminating resources detected, average duration is undefined")]
    NoDetections,
}

/// Push transport failures.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("Invalid push gateway address {address}: {reason}")]
    InvalidGateway { address: String, reason: String },

    #[error("Failed to build metric {metric}: {reason}")]
    Registry { metric: String, reason: String },

    #[error("Failed to encode metrics: {reason}")]
    Encode { reason: String },

    #[error("Push to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    #[error("Push gateway {url} rejected metrics with status {status}: {body}")]
    Rejected { url: String, status: u16, body: String },
}

/// Everything that can end a collector run.
#[derive(Debug, Error)]
pub enum CollectorError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Sample(#[from] SampleError),

    #[error(transparent)]
    Publish(#[from] PublishError),
}
