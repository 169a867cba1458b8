// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Namespace management utilities

use super::KubeClient;
use crate::error::{is_already_exists, is_not_found, E2eError, Result};
use crate::poll::PollOutcome;
use crate::types::ResourceRef;
use k8s_openapi::api::core::v1::Namespace;
use kube::{
    api::{DeleteParams, ObjectMeta, PostParams},
    Api,
};
use tracing::{debug, info, instrument};

impl KubeClient {
    fn namespaces(&self) -> Api<Namespace> {
        Api::all(self.client().clone())
    }

    /// Create a namespace unless it already exists
    #[instrument(skip(self))]
    pub async fn create_namespace(&self, namespace: &str) -> Result<()> {
        let namespaces = self.namespaces();

        match namespaces.get(namespace).await {
            Ok(_) => {
                debug!("Namespace {} already exists", namespace);
                Ok(())
            }
            Err(e) if is_not_found(&e) => {
                info!("Creating namespace {}", namespace);
                let ns = Namespace {
                    metadata: ObjectMeta {
                        name: Some(namespace.to_string()),
                        ..Default::default()
                    },
                    ..Default::default()
                };
                match namespaces.create(&PostParams::default(), &ns).await {
                    Ok(_) => {
                        info!("Namespace {} created successfully", namespace);
                        Ok(())
                    }
                    Err(e) if is_already_exists(&e) => {
                        debug!("Namespace {} was created concurrently", namespace);
                        Ok(())
                    }
                    Err(e) => Err(e.into()),
                }
            }
            Err(e) => Err(E2eError::NamespaceError(format!(
                "Failed to check/create namespace {}: {}",
                namespace, e
            ))),
        }
    }

    /// Wait until a namespace is gone from the cluster
    #[instrument(skip(self))]
    pub async fn wait_for_namespace_cleanup(&self, namespace: &str) -> Result<()> {
        let namespaces = self.namespaces();

        self.poller(
            ResourceRef::cluster::<Namespace>(namespace),
            self.config().poll_interval,
        )
        .dump_snapshots(true)
        .poll(
            || namespaces.get_opt(namespace),
            |ns: &Option<Namespace>| match ns {
                None => PollOutcome::Satisfied,
                Some(ns) => PollOutcome::Pending(format!(
                    "Waiting for cleanup of namespace {} (phase {})",
                    namespace,
                    ns.status
                        .as_ref()
                        .and_then(|s| s.phase.as_deref())
                        .unwrap_or("Unknown")
                )),
            },
        )
        .await?;

        info!("Namespace {} cleaned up", namespace);
        Ok(())
    }

    /// Delete a namespace and wait for it to disappear
    #[instrument(skip(self))]
    pub async fn destroy_namespace(&self, namespace: &str) -> Result<()> {
        match self
            .namespaces()
            .delete(namespace, &DeleteParams::default())
            .await
        {
            Ok(_) => {
                info!("Deleting namespace {}", namespace);
                self.wait_for_namespace_cleanup(namespace).await
            }
            Err(e) if is_not_found(&e) => {
                debug!("Namespace {} already gone", namespace);
                Ok(())
            }
            Err(e) => Err(E2eError::NamespaceError(format!(
                "Failed to delete namespace {}: {}",
                namespace, e
            ))),
        }
    }
}
