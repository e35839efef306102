//! perfpulse - pushes Kubernetes workload health metrics to a Prometheus Pushgateway.
//!
//! # Usage
//! ```sh
//! perfpulse k8s-jobs-terminating --cluster prod --namespace batch --gateway pushgateway:9091 --count -1
//! perfpulse k8s-kubectl-latency --cluster prod --namespace batch --gateway pushgateway:9091
//! ```
//!
//! # Environment Variables
//! - `RUST_LOG` - Log filter (default: info)
//! - `KUBECONFIG` - Kubeconfig files (path list) to try before in-cluster credentials
//! - `PERFPULSE_KUBE_CONTEXT` - Kubeconfig context override
//! - `PUSHGATEWAY_JOB` - Push job name (default: perfpulse)
//! - `PUSHGATEWAY_TIMEOUT_SECS` - Push request timeout (default: 30)
//! - `PUSHGATEWAY_RETRIES` - Retries for transient push failures (default: 0)
//! - `PERFPULSE_REPORT_JSON` - Also print each pushed set as `METRICS_JSON:` (default: false)

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use perfpulse::application::{CredentialResolver, LoopController};
use perfpulse::config::{CollectorArgs, Config};
use perfpulse::domain::types::CollectorKind;
use perfpulse::infrastructure::core::HttpClientFactory;
use perfpulse::infrastructure::kubernetes::{InClusterSource, KubePodSampler, KubeconfigSource};
use perfpulse::infrastructure::observability::PushGatewayPublisher;
use std::sync::Arc;
use std::time::Duration;
use tracing::{Level, info};
use tracing_subscriber::prelude::*;

#[derive(Parser)]
#[command(author, version, about = "Performance pulse for Kubernetes workloads", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Push the latency of listing pods in a namespace
    #[command(name = "k8s-kubectl-latency")]
    KubectlLatency(CollectorArgs),

    /// Push the count and average age of terminating pods in a namespace
    #[command(name = "k8s-jobs-terminating")]
    JobsTerminating(CollectorArgs),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();
    let (kind, args) = match cli.command {
        Commands::KubectlLatency(args) => (CollectorKind::GetPods, args),
        Commands::JobsTerminating(args) => (CollectorKind::Terminating, args),
    };

    let config = Config::load(kind, &args).context("Failed to load configuration")?;
    info!(
        "perfpulse {} starting: kind={}, cluster={}, namespace={}, gateway={}",
        env!("CARGO_PKG_VERSION"),
        kind,
        config.collector.cluster,
        config.collector.namespace,
        config.gateway
    );

    let client = HttpClientFactory::create_client(
        Duration::from_secs(config.push.timeout_secs),
        config.push.max_retries,
    );
    let publisher = PushGatewayPublisher::new(&config.gateway, &config.push.job, client)?;

    let resolver = CredentialResolver::new(
        Box::new(KubeconfigSource::new(
            config.kube.kubeconfig_paths.clone(),
            config.kube.context.clone(),
        )),
        Box::new(InClusterSource),
    );

    let mut controller = LoopController::new(config.collector.clone(), Arc::new(publisher));
    controller.run(&resolver, KubePodSampler::connect).await?;

    Ok(())
}
