// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use kube::Resource;
use std::fmt;

/// Identifies a remote object for log lines and error messages.
///
/// Nothing is cached behind a handle; every read goes back to the API server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceRef {
    pub kind: String,
    pub namespace: Option<String>,
    pub name: Option<String>,
    pub label_selector: Option<String>,
}

impl ResourceRef {
    /// A named object in a namespace
    pub fn namespaced<K>(namespace: &str, name: &str) -> Self
    where
        K: Resource<DynamicType = ()>,
    {
        ResourceRef {
            kind: K::kind(&()).to_string(),
            namespace: Some(namespace.to_string()),
            name: Some(name.to_string()),
            label_selector: None,
        }
    }

    /// A named cluster-scoped object
    pub fn cluster<K>(name: &str) -> Self
    where
        K: Resource<DynamicType = ()>,
    {
        ResourceRef {
            kind: K::kind(&()).to_string(),
            namespace: None,
            name: Some(name.to_string()),
            label_selector: None,
        }
    }

    /// Every object of a kind matching a label selector in a namespace
    pub fn selected<K>(namespace: &str, label_selector: &str) -> Self
    where
        K: Resource<DynamicType = ()>,
    {
        ResourceRef {
            kind: K::kind(&()).to_string(),
            namespace: Some(namespace.to_string()),
            name: None,
            label_selector: Some(label_selector.to_string()),
        }
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        match (&self.namespace, &self.name) {
            (Some(ns), Some(name)) => write!(f, " {}/{}", ns, name)?,
            (None, Some(name)) => write!(f, " {}", name)?,
            (Some(ns), None) => write!(f, " in {}", ns)?,
            (None, None) => {}
        }
        if let Some(selector) = &self.label_selector {
            write!(f, " [{}]", selector)?;
        }
        Ok(())
    }
}
