// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::{env as vars, poll};
use anyhow::{bail, Context, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Helper configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Explicit kubeconfig path; falls back to `KUBECONFIG`, then `$HOME/.kube/config`
    pub kubeconfig: Option<PathBuf>,
    pub poll_interval: Duration,
    pub rollout_poll_interval: Duration,
    /// Deadline applied to every wait. `None` waits forever.
    pub wait_timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            kubeconfig: None,
            poll_interval: Duration::from_secs(poll::INTERVAL_SECS),
            rollout_poll_interval: Duration::from_secs(poll::ROLLOUT_INTERVAL_SECS),
            wait_timeout: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();

        let kubeconfig = lookup(vars::KUBECONFIG_PATH)
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);

        let poll_interval = parse_secs(&lookup, vars::POLL_INTERVAL_SECS)?
            .unwrap_or(defaults.poll_interval);
        let rollout_poll_interval = parse_secs(&lookup, vars::ROLLOUT_POLL_INTERVAL_SECS)?
            .unwrap_or(defaults.rollout_poll_interval);
        let wait_timeout = parse_secs(&lookup, vars::WAIT_TIMEOUT_SECS)?;

        Ok(Config {
            kubeconfig,
            poll_interval,
            rollout_poll_interval,
            wait_timeout,
        })
    }

    /// Resolve the kubeconfig file to load
    pub fn kubeconfig_path(&self) -> Result<PathBuf> {
        Self::resolve_kubeconfig(self.kubeconfig.as_ref(), |key| env::var(key).ok())
    }

    fn resolve_kubeconfig(
        explicit: Option<&PathBuf>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<PathBuf> {
        if let Some(path) = explicit {
            return Ok(path.clone());
        }
        if let Some(path) = lookup("KUBECONFIG").filter(|p| !p.is_empty()) {
            return Ok(PathBuf::from(path));
        }
        match lookup("HOME").filter(|h| !h.is_empty()) {
            Some(home) => Ok(PathBuf::from(home).join(".kube").join("config")),
            None => bail!("not able to locate home directory"),
        }
    }
}

fn parse_secs(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<Duration>> {
    let Some(raw) = lookup(key).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    let secs: u64 = raw
        .trim()
        .parse()
        .with_context(|| format!("{} must be a whole number of seconds, got '{}'", key, raw))?;
    if secs == 0 {
        bail!("{} must be greater than zero", key);
    }
    Ok(Some(Duration::from_secs(secs)))
}
