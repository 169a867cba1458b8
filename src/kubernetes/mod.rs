// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes CRUD wrappers and wait helpers, all hanging off [`KubeClient`].

pub mod client;
pub mod deployments;
pub mod namespaces;
pub mod nodes;
pub mod pods;
pub mod pvc;
pub mod storage_classes;

pub use client::KubeClient;
pub use deployments::rollout_status;
pub use pods::count_in_phase;
pub use pvc::pvc_bind_status;
