// Snapshot reduction into observations
pub mod aggregation;

// Iteration counting
pub mod budget;

// Domain-specific error types
pub mod errors;

// Port interfaces
pub mod ports;

// Snapshots, labels and observations
pub mod types;
