use crate::domain::ports::{ConfigLoadResult, CredentialSource, Credentials};
use async_trait::async_trait;
use kube::config::{KubeConfigOptions, Kubeconfig};
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::debug;

/// Credentials from one or more kubeconfig files.
///
/// Missing entries are skipped and the rest are merged in order. No existing
/// entry, or an unparsable or unusable result, is `NotFound`; an existing
/// file that cannot be read is `OtherFailure`.
pub struct KubeconfigSource {
    paths: Vec<PathBuf>,
    context: Option<String>,
}

impl KubeconfigSource {
    pub fn new(paths: Vec<PathBuf>, context: Option<String>) -> Self {
        Self { paths, context }
    }

    async fn merged(&self) -> Result<Option<Kubeconfig>, MergeFailure> {
        let mut merged: Option<Kubeconfig> = None;

        for path in &self.paths {
            if let Err(e) = tokio::fs::read_to_string(path).await {
                if e.kind() == ErrorKind::NotFound {
                    debug!(path = %path.display(), "Skipping missing kubeconfig");
                    continue;
                }
                return Err(MergeFailure::Unreadable(format!(
                    "failed to read {}: {}",
                    path.display(),
                    e
                )));
            }

            // read_from resolves certificate paths relative to the file.
            let next = Kubeconfig::read_from(path).map_err(|e| {
                MergeFailure::Invalid(format!("invalid kubeconfig {}: {}", path.display(), e))
            })?;
            merged = Some(match merged {
                None => next,
                Some(current) => current.merge(next).map_err(|e| {
                    MergeFailure::Invalid(format!(
                        "failed to merge kubeconfig {}: {}",
                        path.display(),
                        e
                    ))
                })?,
            });
        }

        Ok(merged)
    }

    fn describe_paths(&self) -> String {
        self.paths
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

enum MergeFailure {
    Invalid(String),
    Unreadable(String),
}

#[async_trait]
impl CredentialSource for KubeconfigSource {
    fn name(&self) -> &'static str {
        "kube config"
    }

    async fn load(&self) -> ConfigLoadResult {
        if self.paths.is_empty() {
            return ConfigLoadResult::NotFound(
                "no kubeconfig location (KUBECONFIG and HOME are unset)".to_string(),
            );
        }

        let kubeconfig = match self.merged().await {
            Ok(Some(kubeconfig)) => kubeconfig,
            Ok(None) => {
                return ConfigLoadResult::NotFound(format!(
                    "{} does not exist",
                    self.describe_paths()
                ));
            }
            Err(MergeFailure::Invalid(reason)) => return ConfigLoadResult::NotFound(reason),
            Err(MergeFailure::Unreadable(reason)) => return ConfigLoadResult::OtherFailure(reason),
        };

        let options = KubeConfigOptions {
            context: self.context.clone(),
            ..Default::default()
        };
        match kube::Config::from_custom_kubeconfig(kubeconfig, &options).await {
            Ok(config) => ConfigLoadResult::Success(Credentials::new(config, self.name())),
            Err(e) => ConfigLoadResult::NotFound(format!(
                "unusable kubeconfig {}: {}",
                self.describe_paths(),
                e
            )),
        }
    }
}

/// Service-account credentials mounted into pods running in the cluster.
#[derive(Default)]
pub struct InClusterSource;

#[async_trait]
impl CredentialSource for InClusterSource {
    fn name(&self) -> &'static str {
        "in-cluster config"
    }

    async fn load(&self) -> ConfigLoadResult {
        match kube::Config::incluster() {
            Ok(config) => ConfigLoadResult::Success(Credentials::new(config, self.name())),
            Err(e) => ConfigLoadResult::NotFound(e.to_string()),
        }
    }
}
