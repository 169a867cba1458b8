// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
pub mod config;
pub mod constants;
pub mod dump;
pub mod error;
pub mod kubernetes;
pub mod logging;
pub mod patch;
pub mod poll;
pub mod types;

#[cfg(test)]
pub mod test_utils;

pub use config::Config;
pub use error::{E2eError, Result};
pub use kubernetes::KubeClient;
pub use poll::{PollOutcome, Poller};
pub use types::ResourceRef;
