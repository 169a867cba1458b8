// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! PersistentVolumeClaim helpers

use super::KubeClient;
use crate::constants::pvc_phase;
use crate::error::{is_already_exists, is_not_found, E2eError, Result};
use crate::poll::PollOutcome;
use crate::types::ResourceRef;
use k8s_openapi::api::core::v1::PersistentVolumeClaim;
use kube::api::{DeleteParams, PostParams};
use kube::{Api, ResourceExt};
use tracing::{debug, info, instrument};

/// Map a claim to its bind state: `Bound` is done, `Lost` is fatal
pub fn pvc_bind_status(pvc: &PersistentVolumeClaim) -> PollOutcome {
    let phase = pvc
        .status
        .as_ref()
        .and_then(|s| s.phase.as_deref())
        .unwrap_or("");

    match phase {
        pvc_phase::BOUND => PollOutcome::Satisfied,
        pvc_phase::LOST => PollOutcome::Failed(E2eError::PvcLost {
            namespace: pvc.namespace().unwrap_or_default(),
            name: pvc.name_any(),
        }),
        other => PollOutcome::Pending(format!(
            "PVC {}/{} in phase {:?}",
            pvc.namespace().unwrap_or_default(),
            pvc.name_any(),
            other
        )),
    }
}

impl KubeClient {
    fn pvcs(&self, namespace: &str) -> Api<PersistentVolumeClaim> {
        Api::namespaced(self.client().clone(), namespace)
    }

    /// Create a claim unless it exists, then wait for it to be bound
    #[instrument(skip(self, pvc), fields(pvc = %pvc.name_any()))]
    pub async fn create_pvc(&self, pvc: &PersistentVolumeClaim) -> Result<()> {
        let namespace = self.namespace_of(pvc);
        let name = pvc.name_any();

        match self.pvcs(&namespace).create(&PostParams::default(), pvc).await {
            Ok(_) => info!("Created PVC {}/{}", namespace, name),
            Err(e) if is_already_exists(&e) => debug!("PVC {}/{} already exists", namespace, name),
            Err(e) => return Err(e.into()),
        }

        self.wait_for_pvc_bound(&namespace, &name).await?;
        Ok(())
    }

    /// Wait for a claim to be bound, returning its final phase
    #[instrument(skip(self))]
    pub async fn wait_for_pvc_bound(&self, namespace: &str, name: &str) -> Result<String> {
        let pvcs = self.pvcs(namespace);

        let pvc = self
            .poller(
                ResourceRef::namespaced::<PersistentVolumeClaim>(namespace, name),
                self.config().poll_interval,
            )
            .poll(|| pvcs.get(name), pvc_bind_status)
            .await?;

        Ok(pvc
            .status
            .and_then(|s| s.phase)
            .unwrap_or_else(|| pvc_phase::BOUND.to_string()))
    }

    pub async fn get_pvc(&self, namespace: &str, name: &str) -> Result<PersistentVolumeClaim> {
        Ok(self.pvcs(namespace).get(name).await?)
    }

    /// Delete a claim; a claim that is already gone is not an error
    #[instrument(skip(self))]
    pub async fn delete_pvc(&self, namespace: &str, name: &str) -> Result<()> {
        match self.pvcs(namespace).delete(name, &DeleteParams::default()).await {
            Ok(_) => Ok(()),
            Err(e) if is_not_found(&e) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
