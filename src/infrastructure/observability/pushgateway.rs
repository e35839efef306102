use crate::domain::errors::PublishError;
use crate::domain::ports::MetricsPublisher;
use crate::domain::types::ObservationSet;
use crate::infrastructure::observability::metrics::IterationRegistry;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest_middleware::ClientWithMiddleware;
use tracing::debug;
use url::Url;

/// Publishes observation sets to a Prometheus Pushgateway.
///
/// Each push is a `PUT` on `/metrics/job/<job>`, which replaces every metric
/// previously pushed for that job.
pub struct PushGatewayPublisher {
    client: ClientWithMiddleware,
    gateway: String,
    url: Url,
}

impl PushGatewayPublisher {
    pub fn new(gateway: &str, job: &str, client: ClientWithMiddleware) -> Result<Self, PublishError> {
        Ok(Self {
            client,
            gateway: gateway.to_string(),
            url: push_url(gateway, job)?,
        })
    }
}

/// Build the push URL. A bare `host:port` is treated as plain HTTP.
pub fn push_url(gateway: &str, job: &str) -> Result<Url, PublishError> {
    let invalid = |reason: String| PublishError::InvalidGateway {
        address: gateway.to_string(),
        reason,
    };

    if job.is_empty() {
        return Err(invalid("job name is empty".to_string()));
    }

    let address = if gateway.contains("://") {
        gateway.to_string()
    } else {
        format!("http://{}", gateway)
    };
    let mut url = Url::parse(&address).map_err(|e| invalid(e.to_string()))?;
    if url.host_str().is_none() {
        return Err(invalid("missing host".to_string()));
    }

    url.path_segments_mut()
        .map_err(|_| invalid("address cannot carry a path".to_string()))?
        .pop_if_empty()
        .extend(["metrics", "job", job]);
    Ok(url)
}

#[async_trait]
impl MetricsPublisher for PushGatewayPublisher {
    async fn publish(&self, observations: &ObservationSet) -> Result<(), PublishError> {
        let registry = IterationRegistry::from_observations(observations)?;
        let body = registry.render()?;

        let response = self
            .client
            .put(self.url.clone())
            .header(CONTENT_TYPE, registry.content_type())
            .body(body)
            .send()
            .await
            .map_err(|e| PublishError::Transport {
                url: self.url.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PublishError::Rejected {
                url: self.url.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        debug!(url = %self.url, status = status.as_u16(), "Push accepted");
        Ok(())
    }

    fn endpoint(&self) -> &str {
        &self.gateway
    }
}
