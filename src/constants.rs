// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Polling configuration for the wait helpers
pub mod poll {
    /// Interval in seconds between pod, namespace and PVC checks
    pub const INTERVAL_SECS: u64 = 5;
    /// Interval in seconds between deployment rollout checks
    pub const ROLLOUT_INTERVAL_SECS: u64 = 2;
    /// Number of pending attempts between two diagnostic log lines
    pub const DIAGNOSTIC_EVERY: u32 = 6;
}

/// PersistentVolumeClaim phases
pub mod pvc_phase {
    pub const BOUND: &str = "Bound";
    pub const LOST: &str = "Lost";
}

/// Pod phases
pub mod pod_phase {
    pub const PENDING: &str = "Pending";
    pub const RUNNING: &str = "Running";
    pub const SUCCEEDED: &str = "Succeeded";
    pub const FAILED: &str = "Failed";
}

/// Deployment status conditions
pub mod deployment {
    pub const PROGRESSING: &str = "Progressing";
    pub const PROGRESS_DEADLINE_EXCEEDED: &str = "ProgressDeadlineExceeded";
}

/// Environment variables read by [`crate::config::Config::from_env`]
pub mod env {
    pub const KUBECONFIG_PATH: &str = "E2E_KUBECONFIG";
    pub const POLL_INTERVAL_SECS: &str = "E2E_POLL_INTERVAL_SECS";
    pub const ROLLOUT_POLL_INTERVAL_SECS: &str = "E2E_ROLLOUT_POLL_INTERVAL_SECS";
    pub const WAIT_TIMEOUT_SECS: &str = "E2E_WAIT_TIMEOUT_SECS";
}
