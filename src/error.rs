use kube_client::config::{InferConfigError, KubeconfigError};
use kube_core::ErrorResponse;

/// Errors surfaced by lookups, watches and client bootstrap.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The path did not have the `"name/key"` shape.
    #[error("malformed path {path:?}, expected \"name/key\"")]
    Path {
        /// The offending input.
        path: String,
    },

    /// The object exists but does not carry the requested field.
    #[error("key {key:?} not found in {kind} {name:?}")]
    MissingKey {
        /// Object kind, `"ConfigMap"` or `"Secret"`.
        kind: &'static str,
        /// The object name.
        name: String,
        /// The field that was looked up.
        key: String,
    },

    /// Request or transport failure from the apiserver.
    #[error("Kubernetes API error: {0}")]
    Kube(#[from] kube_client::Error),

    /// Status object received on an open watch stream.
    #[error("watch error: {0}")]
    Watch(ErrorResponse),

    #[error("failed to load kubeconfig: {0}")]
    Kubeconfig(#[from] KubeconfigError),

    #[error("failed to infer client config: {0}")]
    InferConfig(#[from] InferConfigError),
}
