//! Kubernetes API adapters: credential sources and the pod sampler.

pub mod credentials;
pub mod sampler;

pub use credentials::{InClusterSource, KubeconfigSource};
pub use sampler::KubePodSampler;
