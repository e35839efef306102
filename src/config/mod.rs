//! Configuration module for perfpulse.
//!
//! Collector parameters come from the command line; transport and credential
//! lookup settings come from environment variables.

mod kube_config;
mod push_config;

pub use kube_config::KubeEnvConfig;
pub use push_config::PushEnvConfig;

use crate::domain::budget::IterationBudget;
use crate::domain::types::CollectorKind;
use anyhow::{Result, bail};
use clap::Args;
use std::time::Duration;

/// Arguments shared by every collector subcommand.
#[derive(Debug, Clone, Args)]
pub struct CollectorArgs {
    /// Cluster name, used only as a label
    #[arg(long)]
    pub cluster: String,

    /// Namespace to list pods in
    #[arg(long)]
    pub namespace: String,

    /// Push gateway address (URL or host:port)
    #[arg(long)]
    pub gateway: String,

    /// Seconds to sleep between pushes
    #[arg(long, default_value_t = 60)]
    pub sleep: u64,

    /// Number of pushes; -1 pushes forever
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    pub count: i64,
}

/// Everything the loop controller needs to run one collector.
#[derive(Debug, Clone)]
pub struct CollectorSettings {
    pub kind: CollectorKind,
    pub cluster: String,
    pub namespace: String,
    pub interval: Duration,
    pub budget: IterationBudget,
    pub report_json: bool,
}

impl CollectorSettings {
    pub fn new(kind: CollectorKind, args: &CollectorArgs) -> Result<Self> {
        if args.namespace.trim().is_empty() {
            bail!("Namespace must not be empty");
        }
        Ok(Self {
            kind,
            cluster: args.cluster.clone(),
            namespace: args.namespace.trim().to_string(),
            interval: Duration::from_secs(args.sleep),
            budget: IterationBudget::from_count(args.count),
            report_json: false,
        })
    }
}

/// Main application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub collector: CollectorSettings,
    pub gateway: String,
    pub push: PushEnvConfig,
    pub kube: KubeEnvConfig,
}

impl Config {
    pub fn load(kind: CollectorKind, args: &CollectorArgs) -> Result<Self> {
        if args.gateway.trim().is_empty() {
            bail!("Gateway address must not be empty");
        }

        let push = PushEnvConfig::from_env()?;
        let kube = KubeEnvConfig::from_env();
        let mut collector = CollectorSettings::new(kind, args)?;
        collector.report_json = push.report_json;

        Ok(Self {
            collector,
            gateway: args.gateway.trim().to_string(),
            push,
            kube,
        })
    }
}
