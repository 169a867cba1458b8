// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

use super::KubeClient;
use crate::error::Result;
use k8s_openapi::api::core::v1::Node;
use kube::api::{ListParams, ObjectList};
use kube::Api;
use tracing::instrument;

impl KubeClient {
    #[instrument(skip(self))]
    pub async fn list_nodes(&self, label_selector: &str) -> Result<ObjectList<Node>> {
        let nodes: Api<Node> = Api::all(self.client().clone());
        Ok(nodes.list(&ListParams::default().labels(label_selector)).await?)
    }
}
