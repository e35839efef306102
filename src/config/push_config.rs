//! Push gateway configuration parsing from environment variables.

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;

/// Push gateway environment configuration
#[derive(Debug, Clone)]
pub struct PushEnvConfig {
    pub job: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub report_json: bool,
}

impl Default for PushEnvConfig {
    fn default() -> Self {
        Self {
            job: "perfpulse".to_string(),
            timeout_secs: 30,
            max_retries: 0,
            report_json: false,
        }
    }
}

impl PushEnvConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            job: env::var("PUSHGATEWAY_JOB")
                .ok()
                .filter(|job| !job.trim().is_empty())
                .unwrap_or(defaults.job),
            timeout_secs: parse_var("PUSHGATEWAY_TIMEOUT_SECS", defaults.timeout_secs)?,
            max_retries: parse_var("PUSHGATEWAY_RETRIES", defaults.max_retries)?,
            report_json: parse_var("PERFPULSE_REPORT_JSON", defaults.report_json)?,
        })
    }
}

pub(crate) fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Invalid value for {}: {:?}", name, raw)),
        Err(_) => Ok(default),
    }
}
