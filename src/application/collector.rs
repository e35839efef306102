//! Sample → aggregate → publish loop shared by both collectors.

use crate::application::credentials::CredentialResolver;
use crate::config::CollectorSettings;
use crate::domain::aggregation::{TerminationSummary, latency_observation};
use crate::domain::errors::{AuthError, CollectorError};
use crate::domain::ports::{Credentials, MetricsPublisher, ResourceSampler};
use crate::domain::types::{CollectorKind, Labels, ObservationSet, ObservationValue};
use std::sync::Arc;
use tokio::time::Instant;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Resolving,
    Running,
    Sleeping,
    Done,
}

/// What a finished run did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub iterations: u64,
    pub sleeps: u64,
}

pub struct LoopController {
    settings: CollectorSettings,
    publisher: Arc<dyn MetricsPublisher>,
    state: LoopState,
}

impl LoopController {
    pub fn new(settings: CollectorSettings, publisher: Arc<dyn MetricsPublisher>) -> Self {
        Self {
            settings,
            publisher,
            state: LoopState::Resolving,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Resolve credentials once, connect the sampler, then loop until the budget runs out.
    pub async fn run<S, F>(
        &mut self,
        resolver: &CredentialResolver,
        connect: F,
    ) -> Result<RunSummary, CollectorError>
    where
        S: ResourceSampler,
        F: FnOnce(Credentials) -> Result<S, AuthError>,
    {
        self.transition(LoopState::Resolving);
        let credentials = resolver.resolve().await?;
        info!(
            source = credentials.source(),
            cluster_url = %credentials.cluster_url(),
            "Connecting to cluster API"
        );
        let sampler = connect(credentials)?;
        self.run_with(&sampler).await
    }

    /// Drive the loop with an already connected sampler.
    pub async fn run_with<S>(&mut self, sampler: &S) -> Result<RunSummary, CollectorError>
    where
        S: ResourceSampler + ?Sized,
    {
        let mut budget = self.settings.budget;
        let mut summary = RunSummary::default();

        info!(
            cluster = %self.settings.cluster,
            namespace = %self.settings.namespace,
            kind = %self.settings.kind,
            budget = %budget,
            "Starting collector"
        );

        self.transition(if budget.is_exhausted() {
            LoopState::Done
        } else {
            LoopState::Running
        });

        loop {
            match self.state() {
                LoopState::Running => {
                    self.run_iteration(sampler).await?;
                    summary.iterations += 1;
                    budget.consume();
                    self.transition(if budget.is_exhausted() {
                        LoopState::Done
                    } else {
                        LoopState::Sleeping
                    });
                }
                LoopState::Sleeping => {
                    info!("Sleeping for {} seconds", self.settings.interval.as_secs());
                    tokio::time::sleep(self.settings.interval).await;
                    summary.sleeps += 1;
                    self.transition(LoopState::Running);
                }
                LoopState::Done | LoopState::Resolving => break,
            }
        }

        info!(iterations = summary.iterations, "Collector finished");
        Ok(summary)
    }

    /// One full cycle. Either everything succeeds or the error ends the run.
    async fn run_iteration<S>(&self, sampler: &S) -> Result<(), CollectorError>
    where
        S: ResourceSampler + ?Sized,
    {
        let labels = Labels::new(
            self.settings.cluster.clone(),
            self.settings.namespace.clone(),
            self.settings.kind,
        );
        let mut observations = ObservationSet::new(labels);

        match self.settings.kind {
            CollectorKind::Terminating => {
                let snapshot = sampler.sample(&self.settings.namespace).await?;
                let summary = TerminationSummary::from_snapshot(&snapshot);
                info!(
                    detections = summary.detections,
                    "Total number of jobs in terminating state: {}", summary.detections
                );
                let (computed, skipped) = summary.observations();
                if let Some(reason) = skipped {
                    info!("Average duration of jobs in terminating state: no data ({})", reason);
                }
                for observation in computed {
                    if let ObservationValue::Distribution(avg) = observation.value {
                        info!(
                            average_seconds = avg,
                            "Average duration of jobs in terminating state: {}", avg
                        );
                    }
                    observations.push(observation);
                }
            }
            CollectorKind::GetPods => {
                let started = Instant::now();
                sampler.sample(&self.settings.namespace).await?;
                let elapsed = started.elapsed();
                info!(
                    latency_seconds = elapsed.as_secs_f64(),
                    "kubectl get pods command latency: {}",
                    elapsed.as_secs_f64()
                );
                observations.push(latency_observation(elapsed));
            }
        }

        self.publisher.publish(&observations).await?;
        info!("Pushed metrics to {}", self.publisher.endpoint());

        if self.settings.report_json {
            match metrics_report(&observations) {
                Ok(line) => println!("{}", line),
                Err(e) => warn!("Failed to serialize metrics: {}", e),
            }
        }

        Ok(())
    }

    fn transition(&mut self, next: LoopState) {
        debug!(from = ?self.state, to = ?next, "Collector state change");
        self.state = next;
    }
}

/// One-line machine-readable summary of a pushed observation set.
pub(crate) fn metrics_report(observations: &ObservationSet) -> serde_json::Result<String> {
    Ok(format!("METRICS_JSON:{}", serde_json::to_string(observations)?))
}
