//! Cluster credential lookup configuration.

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Debug, Clone, Default)]
pub struct KubeEnvConfig {
    /// Kubeconfig files to merge, in precedence order.
    pub kubeconfig_paths: Vec<PathBuf>,
    /// Context override; the kubeconfig's current context otherwise.
    pub context: Option<String>,
}

impl KubeEnvConfig {
    pub fn from_env() -> Self {
        Self {
            kubeconfig_paths: kubeconfig_paths(
                env::var_os("KUBECONFIG"),
                env::var_os("HOME").map(PathBuf::from),
            ),
            context: env::var("PERFPULSE_KUBE_CONTEXT")
                .ok()
                .filter(|c| !c.trim().is_empty()),
        }
    }
}

/// Every `KUBECONFIG` entry, else `$HOME/.kube/config`.
fn kubeconfig_paths(kubeconfig: Option<OsString>, home: Option<PathBuf>) -> Vec<PathBuf> {
    let listed: Vec<PathBuf> = kubeconfig
        .map(|paths| {
            env::split_paths(&paths)
                .filter(|p| !p.as_os_str().is_empty())
                .collect()
        })
        .unwrap_or_default();
    if !listed.is_empty() {
        return listed;
    }
    home.map(|h| vec![h.join(".kube").join("config")])
        .unwrap_or_default()
}
