// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

use super::KubeClient;
use crate::error::{is_already_exists, Result};
use k8s_openapi::api::storage::v1::StorageClass;
use kube::api::{DeleteParams, PostParams};
use kube::{Api, ResourceExt};
use tracing::{debug, info, instrument};

impl KubeClient {
    fn storage_classes(&self) -> Api<StorageClass> {
        Api::all(self.client().clone())
    }

    /// Create a storage class unless it already exists
    #[instrument(skip(self, sc), fields(storage_class = %sc.name_any()))]
    pub async fn create_storage_class(&self, sc: &StorageClass) -> Result<()> {
        match self.storage_classes().create(&PostParams::default(), sc).await {
            Ok(_) => {
                info!("Created storage class {}", sc.name_any());
                Ok(())
            }
            Err(e) if is_already_exists(&e) => {
                debug!("Storage class {} already exists", sc.name_any());
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self))]
    pub async fn delete_storage_class(&self, name: &str) -> Result<()> {
        self.storage_classes()
            .delete(name, &DeleteParams::default())
            .await?;
        Ok(())
    }
}
