//! Reduction of snapshots and timings into publishable observations.

use crate::domain::errors::AggregationError;
use crate::domain::types::{
    JOB_AVG_DURATION, JOBS_COUNT, KUBECTL_DURATION, Observation, ResourceSnapshot,
};
use std::time::Duration;

/// Terminating-record statistics for one snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerminationSummary {
    pub detections: u64,
    /// Sum of `taken_at - deletion_timestamp` over terminating records, in seconds.
    pub total_duration_secs: f64,
}

impl TerminationSummary {
    pub fn from_snapshot(snapshot: &ResourceSnapshot) -> Self {
        let mut detections = 0u64;
        let mut total_duration_secs = 0.0;

        for since in snapshot
            .records
            .iter()
            .filter_map(|record| record.deletion_timestamp)
        {
            detections += 1;
            // Negative while the pod is still inside its grace period.
            let elapsed = snapshot.taken_at.signed_duration_since(since);
            total_duration_secs += match elapsed.num_microseconds() {
                Some(us) => us as f64 / 1_000_000.0,
                None => elapsed.num_seconds() as f64,
            };
        }

        Self {
            detections,
            total_duration_secs,
        }
    }

    pub fn average_duration_secs(&self) -> Result<f64, AggregationError> {
        if self.detections == 0 {
            return Err(AggregationError::NoDetections);
        }
        Ok(self.total_duration_secs / self.detections as f64)
    }

    /// Gauge of detections, plus the average duration sample when it is defined.
    pub fn observations(&self) -> (Vec<Observation>, Option<AggregationError>) {
        let mut observations = Vec::with_capacity(2);
        let skipped = match self.average_duration_secs() {
            Ok(avg) => {
                observations.push(Observation::distribution(JOB_AVG_DURATION, avg));
                None
            }
            Err(e) => Some(e),
        };
        observations.push(Observation::gauge(JOBS_COUNT, self.detections as f64));
        (observations, skipped)
    }
}

pub fn latency_observation(elapsed: Duration) -> Observation {
    Observation::distribution(KUBECTL_DURATION, elapsed.as_secs_f64())
}
