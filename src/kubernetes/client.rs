// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Client handle shared by every helper

use crate::config::Config;
use crate::error::{E2eError, Result};
use crate::poll::Poller;
use crate::types::ResourceRef;
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Resource, ResourceExt};
use std::time::Duration;
use tracing::{debug, info};

/// A Kubernetes client together with the helper configuration.
///
/// Every CRUD wrapper and wait helper hangs off this type, so test suites pass
/// it around explicitly instead of relying on a process-wide client.
#[derive(Clone)]
pub struct KubeClient {
    client: Client,
    config: Config,
}

impl KubeClient {
    pub fn new(client: Client, config: Config) -> Self {
        KubeClient { client, config }
    }

    /// Connect using the kubeconfig file the configuration points at
    pub async fn from_config(config: Config) -> Result<Self> {
        let path = config
            .kubeconfig_path()
            .map_err(|e| E2eError::KubeconfigError(e.to_string()))?;

        info!("Loading kubeconfig from {}", path.display());

        let kubeconfig = Kubeconfig::read_from(&path).map_err(|e| {
            E2eError::KubeconfigError(format!(
                "Failed to read kubeconfig {}: {}",
                path.display(),
                e
            ))
        })?;

        let client_config =
            kube::Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
                .await
                .map_err(|e| {
                    E2eError::KubeconfigError(format!("Failed to create config: {}", e))
                })?;

        debug!("Connecting to cluster at {}", client_config.cluster_url);

        let client = Client::try_from(client_config)
            .map_err(|e| E2eError::KubeconfigError(format!("Failed to create client: {}", e)))?;

        Ok(KubeClient::new(client, config))
    }

    /// Load [`Config::from_env`] and connect with it
    pub async fn try_default() -> Result<Self> {
        let config = Config::from_env().map_err(|e| E2eError::KubeconfigError(e.to_string()))?;
        Self::from_config(config).await
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Namespace of `obj`, or the client's default namespace when it has none
    pub(crate) fn namespace_of<K: Resource>(&self, obj: &K) -> String {
        obj.namespace()
            .unwrap_or_else(|| self.client.default_namespace().to_string())
    }

    /// Poller for `resource` honouring the configured deadline
    pub(crate) fn poller(&self, resource: ResourceRef, interval: Duration) -> Poller {
        Poller::new(resource, interval).with_deadline(self.config.wait_timeout)
    }
}
