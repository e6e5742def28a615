//! Client-config bootstrap.

use std::path::Path;

use kube_client::config::{KubeConfigOptions, Kubeconfig};
use kube_client::{Client, Config};

use crate::Error;

/// Namespace used when the caller passes an empty one.
pub const DEFAULT_NAMESPACE: &str = "default";

/// Builds a client from `kubeconfig` if a path is given, otherwise from the
/// environment: in-cluster config first, then the default kubeconfig chain
/// (`KUBECONFIG`, `~/.kube/config`).
pub async fn bootstrap(kubeconfig: Option<&Path>) -> Result<Client, Error> {
    let config = match kubeconfig {
        Some(path) => {
            let kubeconfig = Kubeconfig::read_from(path)?;
            Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default()).await?
        }
        None => Config::infer().await?,
    };
    Ok(Client::try_from(config)?)
}

pub fn namespace_or_default(namespace: &str) -> &str {
    if namespace.is_empty() {
        DEFAULT_NAMESPACE
    } else {
        namespace
    }
}
