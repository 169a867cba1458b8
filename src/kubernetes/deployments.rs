// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Deployment CRUD and rollout tracking

use super::KubeClient;
use crate::constants::deployment::{PROGRESSING, PROGRESS_DEADLINE_EXCEEDED};
use crate::error::{is_already_exists, E2eError, Result};
use crate::patch::two_way_merge_patch;
use crate::poll::PollOutcome;
use crate::types::ResourceRef;
use k8s_openapi::api::apps::v1::Deployment;
use kube::api::{DeleteParams, ListParams, ObjectList, Patch, PatchParams, PostParams};
use kube::{Api, ResourceExt};
use tracing::{debug, info, instrument};

/// Evaluate how far a deployment's rollout has progressed.
///
/// Mirrors `kubectl rollout status`: nothing counts until the controller has
/// observed the latest generation, then a progress deadline failure wins over
/// the replica counters.
pub fn rollout_status(deploy: &Deployment) -> PollOutcome {
    let generation = deploy.metadata.generation.unwrap_or(0);
    let Some(status) = deploy.status.as_ref() else {
        return PollOutcome::Pending("Waiting for deployment spec update to be observed".to_string());
    };
    if generation > status.observed_generation.unwrap_or(0) {
        return PollOutcome::Pending("Waiting for deployment spec update to be observed".to_string());
    }

    let deadline_exceeded = status
        .conditions
        .iter()
        .flatten()
        .filter(|c| c.type_ == PROGRESSING)
        .last()
        .is_some_and(|c| c.reason.as_deref() == Some(PROGRESS_DEADLINE_EXCEEDED));
    if deadline_exceeded {
        return PollOutcome::Failed(E2eError::ProgressDeadlineExceeded {
            namespace: deploy.namespace().unwrap_or_default(),
            name: deploy.name_any(),
        });
    }

    let updated = status.updated_replicas.unwrap_or(0);
    let replicas = status.replicas.unwrap_or(0);
    let available = status.available_replicas.unwrap_or(0);

    if let Some(desired) = deploy.spec.as_ref().and_then(|s| s.replicas) {
        if updated < desired {
            return PollOutcome::Pending(format!(
                "Waiting for deployment rollout to finish: {} out of {} new replicas have been updated",
                updated, desired
            ));
        }
    }
    if replicas > updated {
        return PollOutcome::Pending(format!(
            "Waiting for deployment rollout to finish: {} old replicas are pending termination",
            replicas - updated
        ));
    }
    if available < updated {
        return PollOutcome::Pending(format!(
            "Waiting for deployment rollout to finish: {} of {} updated replicas are available",
            available, updated
        ));
    }

    PollOutcome::Satisfied
}

impl KubeClient {
    fn deployments(&self, namespace: &str) -> Api<Deployment> {
        Api::namespaced(self.client().clone(), namespace)
    }

    /// Create a deployment; one that already exists is left untouched
    #[instrument(skip(self, deployment), fields(deployment = %deployment.name_any()))]
    pub async fn create_deployment(&self, deployment: &Deployment) -> Result<()> {
        let namespace = self.namespace_of(deployment);
        let name = deployment.name_any();

        match self
            .deployments(&namespace)
            .create(&PostParams::default(), deployment)
            .await
        {
            Ok(_) => {
                info!("Created deployment {}/{}", namespace, name);
                Ok(())
            }
            Err(e) if is_already_exists(&e) => {
                debug!("Deployment {}/{} already exists", namespace, name);
                Ok(())
            }
            Err(e) => Err(E2eError::DeploymentError(format!(
                "Failed to create deployment {}/{}, err={}",
                namespace, name, e
            ))),
        }
    }

    /// Create the deployment, or patch the live one to match it and wait for the rollout
    #[instrument(skip(self, deployment), fields(deployment = %deployment.name_any()))]
    pub async fn apply_deployment(&self, deployment: &Deployment) -> Result<()> {
        let namespace = self.namespace_of(deployment);
        let name = deployment.name_any();
        let api = self.deployments(&namespace);

        let Some(current) = api.get_opt(&name).await? else {
            api.create(&PostParams::default(), deployment)
                .await
                .map_err(|e| {
                    E2eError::DeploymentError(format!(
                        "Failed to create deployment {}/{}, err={}",
                        namespace, name, e
                    ))
                })?;
            info!("Created deployment {}/{}", namespace, name);
            return Ok(());
        };

        let data = two_way_merge_patch(&current, deployment)?;
        if data.is_empty() {
            debug!("Deployment {}/{} already up to date", namespace, name);
        } else {
            info!("Patching deployment {}/{}", namespace, name);
            api.patch(&name, &PatchParams::default(), &Patch::Merge(&data.patch))
                .await?;
        }

        self.wait_for_deployment_rollout(&namespace, &name).await
    }

    #[instrument(skip(self))]
    pub async fn delete_deployment(&self, namespace: &str, name: &str) -> Result<()> {
        self.deployments(namespace)
            .delete(name, &DeleteParams::default())
            .await?;
        Ok(())
    }

    pub async fn get_deployment(&self, namespace: &str, name: &str) -> Result<Deployment> {
        Ok(self.deployments(namespace).get(name).await?)
    }

    /// Replace a deployment with the given object
    #[instrument(skip(self, deployment), fields(deployment = %deployment.name_any()))]
    pub async fn update_deployment(&self, deployment: &Deployment) -> Result<Deployment> {
        let namespace = self.namespace_of(deployment);
        Ok(self
            .deployments(&namespace)
            .replace(&deployment.name_any(), &PostParams::default(), deployment)
            .await?)
    }

    #[instrument(skip(self))]
    pub async fn list_deployments(
        &self,
        namespace: &str,
        label_selector: &str,
    ) -> Result<ObjectList<Deployment>> {
        Ok(self
            .deployments(namespace)
            .list(&ListParams::default().labels(label_selector))
            .await?)
    }

    /// Wait until the deployment has fully rolled out
    #[instrument(skip(self))]
    pub async fn wait_for_deployment_rollout(&self, namespace: &str, name: &str) -> Result<()> {
        let api = self.deployments(namespace);

        self.poller(
            ResourceRef::namespaced::<Deployment>(namespace, name),
            self.config().rollout_poll_interval,
        )
        .with_diagnostic_every(1)
        .poll(|| api.get(name), rollout_status)
        .await?;

        info!("Deployment {}/{} rolled out", namespace, name);
        Ok(())
    }
}
