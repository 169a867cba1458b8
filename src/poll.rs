// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Condition polling shared by every wait helper.
//!
//! A [`Poller`] fetches a snapshot on a fixed interval and hands it to a
//! predicate until the predicate is satisfied, reports a failure, or the fetch
//! itself errors. There is no backoff and, unless a deadline is configured,
//! no upper bound on the number of attempts.

use crate::constants::poll::DIAGNOSTIC_EVERY;
use crate::dump::dump_object;
use crate::error::{E2eError, Result};
use crate::types::ResourceRef;
use serde::Serialize;
use std::future::Future;
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::{debug, info};

/// Verdict of a predicate over the latest snapshot
#[derive(Debug)]
pub enum PollOutcome {
    Satisfied,
    /// Not there yet; the message describes the gap between observed and expected state
    Pending(String),
    Failed(E2eError),
}

/// Polls a single resource until a predicate over it is satisfied
#[derive(Clone, Debug)]
pub struct Poller {
    resource: ResourceRef,
    interval: Duration,
    deadline: Option<Duration>,
    diagnostic_every: u32,
    dump_snapshots: bool,
}

/// State of one wait call, dropped when the call returns
struct PollSession {
    attempts: u32,
    started: Instant,
    last: String,
}

impl Poller {
    pub fn new(resource: ResourceRef, interval: Duration) -> Self {
        Poller {
            resource,
            interval,
            deadline: None,
            diagnostic_every: DIAGNOSTIC_EVERY,
            dump_snapshots: false,
        }
    }

    /// Give up with [`E2eError::Timeout`] once `deadline` has elapsed. `None` waits forever.
    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    /// Emit an `info` diagnostic every `n` pending attempts
    pub fn with_diagnostic_every(mut self, n: u32) -> Self {
        self.diagnostic_every = n.max(1);
        self
    }

    /// Also dump the latest snapshot as YAML with each diagnostic line
    pub fn dump_snapshots(mut self, dump: bool) -> Self {
        self.dump_snapshots = dump;
        self
    }

    pub fn resource(&self) -> &ResourceRef {
        &self.resource
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// Poll until `predicate` is satisfied, returning the satisfying snapshot.
    ///
    /// - `Ok(snapshot)` as soon as the predicate returns [`PollOutcome::Satisfied`]
    /// - the carried error as soon as it returns [`PollOutcome::Failed`]
    /// - any error from `fetch`, unchanged and without retrying
    pub async fn poll<T, E, F, Fut, P>(&self, mut fetch: F, mut predicate: P) -> Result<T>
    where
        T: Serialize,
        E: Into<E2eError>,
        F: FnMut() -> Fut,
        Fut: Future<Output = std::result::Result<T, E>>,
        P: FnMut(&T) -> PollOutcome,
    {
        let mut session = PollSession {
            attempts: 0,
            started: Instant::now(),
            last: String::new(),
        };

        loop {
            let snapshot = fetch().await.map_err(Into::into)?;
            session.attempts += 1;

            match predicate(&snapshot) {
                PollOutcome::Satisfied => {
                    debug!(
                        resource = %self.resource,
                        attempts = session.attempts,
                        "Condition satisfied"
                    );
                    return Ok(snapshot);
                }
                PollOutcome::Failed(e) => return Err(e),
                PollOutcome::Pending(message) => {
                    debug!(resource = %self.resource, attempt = session.attempts, "{}", message);
                    if session.attempts % self.diagnostic_every == 0 {
                        info!(
                            "Waiting for {} (attempt {}): {}",
                            self.resource, session.attempts, message
                        );
                        if self.dump_snapshots {
                            dump_object(&snapshot);
                        }
                    }
                    session.last = message;
                }
            }

            let mut wait = self.interval;
            if let Some(deadline) = self.deadline {
                let elapsed = session.started.elapsed();
                if elapsed >= deadline {
                    return Err(E2eError::Timeout {
                        resource: self.resource.to_string(),
                        elapsed,
                        last: session.last,
                    });
                }
                wait = wait.min(deadline - elapsed);
            }

            sleep(wait).await;
        }
    }

    /// Poll until `condition` returns `Ok(true)`
    pub async fn poll_until<E, F, Fut>(&self, condition: F) -> Result<()>
    where
        E: Into<E2eError>,
        F: FnMut() -> Fut,
        Fut: Future<Output = std::result::Result<bool, E>>,
    {
        self.poll(condition, |ready: &bool| {
            if *ready {
                PollOutcome::Satisfied
            } else {
                PollOutcome::Pending("condition not met yet".to_string())
            }
        })
        .await
        .map(|_| ())
    }
}
