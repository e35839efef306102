//! Prometheus instruments for a single push.
//!
//! A new [`Registry`] is built for every observation set, so nothing recorded
//! in one iteration can leak into the next push.

use crate::domain::errors::PublishError;
use crate::domain::types::{LABEL_NAMES, MetricDescriptor, ObservationSet, ObservationValue};
use prometheus::{Encoder, GaugeVec, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder};
use std::collections::HashMap;

pub struct IterationRegistry {
    registry: Registry,
}

impl IterationRegistry {
    pub fn from_observations(set: &ObservationSet) -> Result<Self, PublishError> {
        let registry = Registry::new();
        let mut histograms: HashMap<&'static str, HistogramVec> = HashMap::new();
        let mut gauges: HashMap<&'static str, GaugeVec> = HashMap::new();
        let label_values = set.labels.values();

        for observation in &set.observations {
            let metric = observation.metric;
            match observation.value {
                ObservationValue::Distribution(value) => {
                    if !histograms.contains_key(metric.name) {
                        let histogram = HistogramVec::new(
                            HistogramOpts::new(metric.name, metric.help),
                            &LABEL_NAMES,
                        )
                        .map_err(|e| registry_error(metric, e))?;
                        registry
                            .register(Box::new(histogram.clone()))
                            .map_err(|e| registry_error(metric, e))?;
                        histograms.insert(metric.name, histogram);
                    }
                    if let Some(histogram) = histograms.get(metric.name) {
                        histogram.with_label_values(&label_values).observe(value);
                    }
                }
                ObservationValue::Gauge(value) => {
                    if !gauges.contains_key(metric.name) {
                        let gauge = GaugeVec::new(Opts::new(metric.name, metric.help), &LABEL_NAMES)
                            .map_err(|e| registry_error(metric, e))?;
                        registry
                            .register(Box::new(gauge.clone()))
                            .map_err(|e| registry_error(metric, e))?;
                        gauges.insert(metric.name, gauge);
                    }
                    if let Some(gauge) = gauges.get(metric.name) {
                        gauge.with_label_values(&label_values).set(value);
                    }
                }
            }
        }

        Ok(Self { registry })
    }

    /// Render all metrics in Prometheus text format
    pub fn render(&self) -> Result<String, PublishError> {
        let encoder = TextEncoder::new();
        encoder
            .encode_to_string(&self.registry.gather())
            .map_err(|e| PublishError::Encode {
                reason: e.to_string(),
            })
    }

    pub fn content_type(&self) -> String {
        TextEncoder::new().format_type().to_string()
    }
}

fn registry_error(metric: MetricDescriptor, err: prometheus::Error) -> PublishError {
    PublishError::Registry {
        metric: metric.name.to_string(),
        reason: err.to_string(),
    }
}

/// Value of the first sample line for `series` in rendered text output.
#[cfg(test)]
pub(crate) fn sample_value(rendered: &str, series: &str) -> Option<f64> {
    rendered
        .lines()
        .filter(|line| !line.starts_with('#'))
        .find(|line| {
            line.strip_prefix(series)
                .is_some_and(|rest| rest.starts_with('{') || rest.starts_with(' '))
        })
        .and_then(|line| line.rsplit(' ').next())
        .and_then(|value| value.parse().ok())
}
