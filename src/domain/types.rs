use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// One workload record returned by a namespace listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceRecord {
    pub name: String,
    /// Set once the object is marked for deletion but not yet removed.
    pub deletion_timestamp: Option<DateTime<Utc>>,
}

impl ResourceRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            deletion_timestamp: None,
        }
    }

    pub fn terminating_since(name: impl Into<String>, since: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            deletion_timestamp: Some(since),
        }
    }

    pub fn is_terminating(&self) -> bool {
        self.deletion_timestamp.is_some()
    }
}

/// Point-in-time listing of a namespace.
///
/// `taken_at` is stamped once when the listing response arrives and serves as
/// "now" for every duration derived from this snapshot.
#[derive(Debug, Clone)]
pub struct ResourceSnapshot {
    pub namespace: String,
    pub taken_at: DateTime<Utc>,
    pub records: Vec<ResourceRecord>,
}

impl ResourceSnapshot {
    pub fn new(namespace: impl Into<String>, taken_at: DateTime<Utc>, records: Vec<ResourceRecord>) -> Self {
        Self {
            namespace: namespace.into(),
            taken_at,
            records,
        }
    }
}

/// Collector variant, doubling as the value of the `kind` label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectorKind {
    Terminating,
    GetPods,
}

impl CollectorKind {
    pub fn as_label(&self) -> &'static str {
        match self {
            CollectorKind::Terminating => "terminating",
            CollectorKind::GetPods => "get_pods",
        }
    }
}

impl fmt::Display for CollectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

/// Label names, in registration order.
pub const LABEL_NAMES: [&str; 3] = ["cluster", "namespace", "kind"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Labels {
    pub cluster: String,
    pub namespace: String,
    pub kind: CollectorKind,
}

impl Labels {
    pub fn new(cluster: impl Into<String>, namespace: impl Into<String>, kind: CollectorKind) -> Self {
        Self {
            cluster: cluster.into(),
            namespace: namespace.into(),
            kind,
        }
    }

    /// Label values in the order of [`LABEL_NAMES`].
    pub fn values(&self) -> [&str; 3] {
        [self.cluster.as_str(), self.namespace.as_str(), self.kind.as_label()]
    }
}

/// Static description of a published metric family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricDescriptor {
    pub name: &'static str,
    pub help: &'static str,
}

pub const JOB_AVG_DURATION: MetricDescriptor = MetricDescriptor {
    name: "perfpulse_k8s_job_avg_duration_seconds",
    help: "Average duration of jobs in terminating state",
};

/// Keeps the `_count` unit suffix existing dashboards query for.
pub const JOBS_COUNT: MetricDescriptor = MetricDescriptor {
    name: "perfpulse_k8s_jobs_count_total_count",
    help: "Total number of jobs in terminating state",
};

pub const KUBECTL_DURATION: MetricDescriptor = MetricDescriptor {
    name: "perfpulse_k8s_kubectl_duration_seconds",
    help: "duration to execute kubectl commands",
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ObservationValue {
    /// Feeds a histogram.
    Distribution(f64),
    /// Instantaneous value.
    Gauge(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Observation {
    pub metric: MetricDescriptor,
    pub value: ObservationValue,
}

impl Observation {
    pub fn distribution(metric: MetricDescriptor, value: f64) -> Self {
        Self {
            metric,
            value: ObservationValue::Distribution(value),
        }
    }

    pub fn gauge(metric: MetricDescriptor, value: f64) -> Self {
        Self {
            metric,
            value: ObservationValue::Gauge(value),
        }
    }
}

/// All observations computed during one iteration, sharing one label set.
///
/// Built fresh each iteration and consumed by a single publish call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObservationSet {
    pub labels: Labels,
    pub observations: Vec<Observation>,
}

impl ObservationSet {
    pub fn new(labels: Labels) -> Self {
        Self {
            labels,
            observations: Vec::new(),
        }
    }

    pub fn push(&mut self, observation: Observation) {
        self.observations.push(observation);
    }

    pub fn find(&self, metric_name: &str) -> Option<&Observation> {
        self.observations
            .iter()
            .find(|o| o.metric.name == metric_name)
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_kind_labels() {
        assert_eq!(CollectorKind::Terminating.as_label(), "terminating");
        assert_eq!(CollectorKind::GetPods.to_string(), "get_pods");
    }

    #[test]
    fn test_label_values_follow_label_names() {
        let labels = Labels::new("prod-east", "batch", CollectorKind::Terminating);
        assert_eq!(labels.values(), ["prod-east", "batch", "terminating"]);
        assert_eq!(LABEL_NAMES, ["cluster", "namespace", "kind"]);
    }

    #[test]
    fn test_terminating_record() {
        let now = Utc::now();
        assert!(!ResourceRecord::new("job-a").is_terminating());
        assert!(ResourceRecord::terminating_since("job-b", now - Duration::seconds(5)).is_terminating());
    }

    #[test]
    fn test_observation_set_serialization() {
        let mut set = ObservationSet::new(Labels::new("c1", "ns", CollectorKind::GetPods));
        set.push(Observation::distribution(KUBECTL_DURATION, 0.042));

        let json = serde_json::to_string(&set).expect("Failed to serialize");
        assert!(json.contains("perfpulse_k8s_kubectl_duration_seconds"));
        assert!(json.contains("\"kind\":\"get_pods\""));
        assert!(json.contains("\"type\":\"distribution\""));
    }
}
