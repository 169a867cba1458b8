// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Two-way merge patch generation

use crate::error::{E2eError, Result};
use serde::Serialize;
use serde_json::{Map, Value};

/// Metadata fields owned by the API server that a patch must never clear
const SERVER_METADATA: &[&str] = &[
    "uid",
    "resourceVersion",
    "creationTimestamp",
    "generation",
    "managedFields",
    "selfLink",
];

/// Result of diffing a live object against its desired state
#[derive(Debug, Clone, PartialEq)]
pub struct PatchData {
    /// JSON merge patch (RFC 7386) turning `original` into the desired object
    pub patch: Value,
    /// The live object as it was diffed, without server-owned fields
    pub original: Value,
}

impl PatchData {
    /// True when the desired object already matches the live one
    pub fn is_empty(&self) -> bool {
        self.patch.as_object().is_some_and(|m| m.is_empty())
    }
}

/// Compute a merge patch that turns `old` into `new`.
///
/// Keys missing from `new` are set to `null`, nested objects are diffed
/// recursively and arrays are replaced whole. `status` and server-owned
/// metadata are dropped from both sides first.
pub fn two_way_merge_patch<K: Serialize>(old: &K, new: &K) -> Result<PatchData> {
    let mut original = serde_json::to_value(old)
        .map_err(|e| E2eError::PatchError(format!("marshal old object failed: {}", e)))?;
    let mut modified = serde_json::to_value(new)
        .map_err(|e| E2eError::PatchError(format!("marshal new object failed: {}", e)))?;

    strip_server_fields(&mut original);
    strip_server_fields(&mut modified);
    let patch = diff(&original, &modified);

    Ok(PatchData { patch, original })
}

fn strip_server_fields(obj: &mut Value) {
    let Some(map) = obj.as_object_mut() else {
        return;
    };
    map.remove("status");
    if let Some(Value::Object(meta)) = map.get_mut("metadata") {
        for field in SERVER_METADATA {
            meta.remove(*field);
        }
    }
}

fn diff(old: &Value, new: &Value) -> Value {
    let (Value::Object(old_map), Value::Object(new_map)) = (old, new) else {
        return new.clone();
    };

    let mut patch = Map::new();
    for key in old_map.keys() {
        if !new_map.contains_key(key) {
            patch.insert(key.clone(), Value::Null);
        }
    }
    for (key, new_value) in new_map {
        match old_map.get(key) {
            Some(old_value) if old_value == new_value => {}
            Some(old_value) if old_value.is_object() && new_value.is_object() => {
                patch.insert(key.clone(), diff(old_value, new_value));
            }
            _ => {
                patch.insert(key.clone(), new_value.clone());
            }
        }
    }
    Value::Object(patch)
}
