use crate::domain::errors::{AuthError, SampleError};
use crate::domain::ports::{Credentials, ResourceSampler};
use crate::domain::types::{ResourceRecord, ResourceSnapshot};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use k8s_openapi::api::core::v1::Pod;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::Time;
use kube::Client;
use kube::api::{Api, ListParams};
use tracing::{debug, warn};

/// Lists pods through the Kubernetes API, one request per sample.
#[derive(Clone)]
pub struct KubePodSampler {
    client: Client,
}

impl KubePodSampler {
    pub fn connect(credentials: Credentials) -> Result<Self, AuthError> {
        let client = Client::try_from(credentials.into_config()).map_err(|e| AuthError::Client {
            reason: e.to_string(),
        })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ResourceSampler for KubePodSampler {
    async fn sample(&self, namespace: &str) -> Result<ResourceSnapshot, SampleError> {
        let pods: Api<Pod> = Api::namespaced(self.client.clone(), namespace);
        let list = pods
            .list(&ListParams::default())
            .await
            .map_err(|e| SampleError::ListFailed {
                namespace: namespace.to_string(),
                reason: e.to_string(),
            })?;
        let taken_at = Utc::now();

        let records: Vec<ResourceRecord> = list.items.into_iter().map(record_from_pod).collect();
        debug!(namespace, pods = records.len(), "Listed pods");
        Ok(ResourceSnapshot::new(namespace, taken_at, records))
    }
}

pub(crate) fn record_from_pod(pod: Pod) -> ResourceRecord {
    let name = pod.metadata.name.unwrap_or_default();
    let deletion_timestamp = pod.metadata.deletion_timestamp.as_ref().and_then(|time| {
        let converted = to_utc(time);
        if converted.is_none() {
            warn!(pod = %name, "Deletion timestamp out of range, record not counted as terminating");
        }
        converted
    });
    ResourceRecord {
        name,
        deletion_timestamp,
    }
}

fn to_utc(time: &Time) -> Option<DateTime<Utc>> {
    Some(time.0)
}
