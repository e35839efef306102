use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use std::time::Duration;

pub struct HttpClientFactory;

impl HttpClientFactory {
    /// Creates the push client.
    ///
    /// `max_retries` of zero sends each push exactly once; otherwise transient
    /// failures are retried with exponential backoff.
    pub fn create_client(timeout: Duration, max_retries: u32) -> ClientWithMiddleware {
        let client = Client::builder()
            .pool_max_idle_per_host(1)
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self::with_retries(client, max_retries)
    }

    pub fn with_retries(client: Client, max_retries: u32) -> ClientWithMiddleware {
        let builder = ClientBuilder::new(client);
        if max_retries == 0 {
            return builder.build();
        }

        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(max_retries);
        builder
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build()
    }
}
