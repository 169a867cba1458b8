// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum E2eError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("Failed to load kubeconfig: {0}")]
    KubeconfigError(String),

    #[error("Namespace operation failed: {0}")]
    NamespaceError(String),

    #[error("PVC {namespace}/{name} in lost state")]
    PvcLost { namespace: String, name: String },

    #[error("deployment {namespace}/{name} exceeded its progress deadline")]
    ProgressDeadlineExceeded { namespace: String, name: String },

    #[error("{0}")]
    DeploymentError(String),

    #[error("Failed to compute patch: {0}")]
    PatchError(String),

    #[error("Failed to render object as YAML: {0}")]
    DumpError(#[from] serde_yaml::Error),

    #[error("Timed out after {}s waiting for {resource}: {last}", .elapsed.as_secs())]
    Timeout {
        resource: String,
        elapsed: Duration,
        last: String,
    },
}

pub type Result<T> = std::result::Result<T, E2eError>;

/// True when the API server answered 404 for the request.
pub fn is_not_found(err: &kube::Error) -> bool {
    matches!(err, kube::Error::Api(resp) if resp.code == 404)
}

/// True when a create was rejected because the object already exists.
///
/// A plain 409 is also returned for update conflicts, so the reason is checked too.
pub fn is_already_exists(err: &kube::Error) -> bool {
    matches!(err, kube::Error::Api(resp) if resp.code == 409 && resp.reason == "AlreadyExists")
}
