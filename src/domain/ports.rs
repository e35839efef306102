use crate::domain::errors::{PublishError, SampleError};
use crate::domain::types::{ObservationSet, ResourceSnapshot};
use async_trait::async_trait;

/// Authenticated connection settings for the cluster API.
///
/// Resolved once per process and handed to the sampler; never refreshed.
#[derive(Clone)]
pub struct Credentials {
    config: kube::Config,
    source: &'static str,
}

impl Credentials {
    pub fn new(config: kube::Config, source: &'static str) -> Self {
        Self { config, source }
    }

    /// Name of the credential source that produced these credentials.
    pub fn source(&self) -> &'static str {
        self.source
    }

    pub fn cluster_url(&self) -> String {
        self.config.cluster_url.to_string()
    }

    pub fn into_config(self) -> kube::Config {
        self.config
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("source", &self.source)
            .field("cluster_url", &self.cluster_url())
            .finish()
    }
}

/// Outcome of one credential source attempt.
#[derive(Debug)]
pub enum ConfigLoadResult {
    Success(Credentials),
    /// Configuration absent or unusable: the next source may be tried.
    NotFound(String),
    /// Any other failure: resolution stops here.
    OtherFailure(String),
}

#[async_trait]
pub trait CredentialSource: Send + Sync {
    fn name(&self) -> &'static str;
    async fn load(&self) -> ConfigLoadResult;
}

#[async_trait]
pub trait ResourceSampler: Send + Sync {
    /// List every workload record in `namespace` with a single API call.
    async fn sample(&self, namespace: &str) -> Result<ResourceSnapshot, SampleError>;
}

#[async_trait]
pub trait MetricsPublisher: Send + Sync {
    /// Push one iteration's observations, replacing the previous push.
    async fn publish(&self, observations: &ObservationSet) -> Result<(), PublishError>;

    /// Where the observations go, for progress output.
    fn endpoint(&self) -> &str;
}

#[async_trait]
impl<T: ResourceSampler + ?Sized> ResourceSampler for std::sync::Arc<T> {
    async fn sample(&self, namespace: &str) -> Result<ResourceSnapshot, SampleError> {
        (**self).sample(namespace).await
    }
}
