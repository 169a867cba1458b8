// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! YAML rendering of Kubernetes objects for diagnostics

use crate::error::Result;
use serde::Serialize;
use tracing::{info, warn};

/// Render an object as YAML
pub fn to_yaml<K: Serialize>(obj: &K) -> Result<String> {
    Ok(serde_yaml::to_string(obj)?)
}

/// Log the YAML rendering of an object
pub fn dump_object<K: Serialize>(obj: &K) {
    match to_yaml(obj) {
        Ok(yaml) => info!("\n{}", yaml),
        Err(e) => warn!("Unable to dump object: {}", e),
    }
}
