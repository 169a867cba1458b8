// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Pod listing and phase polling

use super::KubeClient;
use crate::error::Result;
use crate::poll::PollOutcome;
use crate::types::ResourceRef;
use k8s_openapi::api::core::v1::Pod;
use kube::api::{ListParams, ObjectList};
use kube::Api;
use tracing::{info, instrument};

/// Number of pods in `phase`
pub fn count_in_phase(pods: &ObjectList<Pod>, phase: &str) -> usize {
    pods.items
        .iter()
        .filter(|pod| {
            pod.status
                .as_ref()
                .and_then(|s| s.phase.as_deref())
                .is_some_and(|p| p == phase)
        })
        .count()
}

impl KubeClient {
    #[instrument(skip(self))]
    pub async fn list_pods(&self, namespace: &str, label_selector: &str) -> Result<ObjectList<Pod>> {
        let pods: Api<Pod> = Api::namespaced(self.client().clone(), namespace);
        Ok(pods.list(&ListParams::default().labels(label_selector)).await?)
    }

    /// Wait until exactly `expected_count` pods matching the selector are in `expected_phase`
    #[instrument(skip(self))]
    pub async fn wait_for_pods(
        &self,
        namespace: &str,
        label_selector: &str,
        expected_phase: &str,
        expected_count: usize,
    ) -> Result<()> {
        let pods: Api<Pod> = Api::namespaced(self.client().clone(), namespace);
        let lp = ListParams::default().labels(label_selector);

        self.poller(
            ResourceRef::selected::<Pod>(namespace, label_selector),
            self.config().poll_interval,
        )
        .poll(
            || pods.list(&lp),
            |list: &ObjectList<Pod>| {
                let count = count_in_phase(list, expected_phase);
                if count == expected_count {
                    PollOutcome::Satisfied
                } else {
                    PollOutcome::Pending(format!(
                        "checking for pod with labelSelector={} in ns={}, phase={} count={} expectedCount={}",
                        label_selector, namespace, expected_phase, count, expected_count
                    ))
                }
            },
        )
        .await?;

        info!(
            "{} pods with labelSelector={} in ns={} are {}",
            expected_count, label_selector, namespace, expected_phase
        );
        Ok(())
    }
}
