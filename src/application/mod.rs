// Sample, aggregate and publish loop
pub mod collector;

// Kubeconfig / in-cluster credential fallback
pub mod credentials;

pub use collector::{LoopController, LoopState, RunSummary};
pub use credentials::CredentialResolver;
