#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, TimeZone, Utc};
use perfpulse::config::CollectorSettings;
use perfpulse::domain::budget::IterationBudget;
use perfpulse::domain::errors::{PublishError, SampleError};
use perfpulse::domain::ports::{
    ConfigLoadResult, CredentialSource, Credentials, MetricsPublisher, ResourceSampler,
};
use perfpulse::domain::types::{CollectorKind, ObservationSet, ResourceRecord, ResourceSnapshot};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

pub fn settings(kind: CollectorKind, count: i64) -> CollectorSettings {
    CollectorSettings {
        kind,
        cluster: "prod-east".to_string(),
        namespace: "batch".to_string(),
        interval: Duration::from_secs(60),
        budget: IterationBudget::from_count(count),
        report_json: false,
    }
}

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
}

/// Snapshot taken at `base_time()`; `Some(n)` marks a record terminating for `n` seconds.
pub fn snapshot(ages_secs: &[Option<i64>]) -> ResourceSnapshot {
    let now = base_time();
    let records = ages_secs
        .iter()
        .enumerate()
        .map(|(i, age)| match age {
            Some(secs) => {
                ResourceRecord::terminating_since(format!("job-{}", i), now - ChronoDuration::seconds(*secs))
            }
            None => ResourceRecord::new(format!("job-{}", i)),
        })
        .collect();
    ResourceSnapshot::new("batch", now, records)
}

pub enum Scripted {
    Snapshot(ResourceSnapshot),
    Fail(String),
}

/// Replays scripted responses, then empty snapshots once the script runs out.
pub struct ScriptedSampler {
    script: Mutex<VecDeque<Scripted>>,
    delay: Duration,
    calls: AtomicUsize,
}

impl ScriptedSampler {
    pub fn new(script: Vec<Scripted>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ResourceSampler for ScriptedSampler {
    async fn sample(&self, namespace: &str) -> Result<ResourceSnapshot, SampleError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(Scripted::Snapshot(snapshot)) => Ok(snapshot),
            Some(Scripted::Fail(reason)) => Err(SampleError::ListFailed {
                namespace: namespace.to_string(),
                reason,
            }),
            None => Ok(ResourceSnapshot::new(namespace, base_time(), vec![])),
        }
    }
}

#[derive(Clone)]
pub struct Published {
    pub set: ObservationSet,
    pub at: Instant,
}

/// Records every observation set it is handed.
#[derive(Clone, Default)]
pub struct RecordingPublisher {
    pub published: Arc<Mutex<Vec<Published>>>,
    fail_with_status: Option<u16>,
}

impl RecordingPublisher {
    pub fn failing(status: u16) -> Self {
        Self {
            published: Arc::default(),
            fail_with_status: Some(status),
        }
    }

    pub fn sets(&self) -> Vec<ObservationSet> {
        self.published
            .lock()
            .unwrap()
            .iter()
            .map(|p| p.set.clone())
            .collect()
    }

    pub fn times(&self) -> Vec<Instant> {
        self.published.lock().unwrap().iter().map(|p| p.at).collect()
    }
}

#[async_trait]
impl MetricsPublisher for RecordingPublisher {
    async fn publish(&self, observations: &ObservationSet) -> Result<(), PublishError> {
        if let Some(status) = self.fail_with_status {
            return Err(PublishError::Rejected {
                url: "http://gw:9091/metrics/job/perfpulse".to_string(),
                status,
                body: "unavailable".to_string(),
            });
        }
        self.published.lock().unwrap().push(Published {
            set: observations.clone(),
            at: Instant::now(),
        });
        Ok(())
    }

    fn endpoint(&self) -> &str {
        "gw:9091"
    }
}

#[derive(Clone, Copy)]
pub enum SourceOutcome {
    Success,
    NotFound,
    OtherFailure,
}

pub struct FakeSource {
    name: &'static str,
    outcome: SourceOutcome,
    pub calls: Arc<AtomicUsize>,
}

impl FakeSource {
    pub fn new(name: &'static str, outcome: SourceOutcome) -> Self {
        Self {
            name,
            outcome,
            calls: Arc::default(),
        }
    }
}

#[async_trait]
impl CredentialSource for FakeSource {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn load(&self) -> ConfigLoadResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.outcome {
            SourceOutcome::Success => {
                let config = kube::Config::new("https://10.0.0.1:6443".parse().unwrap());
                ConfigLoadResult::Success(Credentials::new(config, self.name))
            }
            SourceOutcome::NotFound => ConfigLoadResult::NotFound(format!("{} not found", self.name)),
            SourceOutcome::OtherFailure => {
                ConfigLoadResult::OtherFailure(format!("{} permission denied", self.name))
            }
        }
    }
}
