// Copyright 2026, The config-examples Authors
// SPDX-License-Identifier: Apache-2.0

//! Readiness polling for installed resources

use super::client::ClusterApi;
use crate::error::{Result, ScenarioError};
use crate::types::condition::conditions_of;
pub use crate::types::condition::is_ready;
use crate::types::identity::ResourceIdentity;
use kube::api::DynamicObject;
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::{debug, info, instrument, warn};

/// How long to wait and how often to look
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub timeout: Duration,
    pub interval: Duration,
}

impl PollPolicy {
    pub fn new(timeout: Duration, interval: Duration) -> Self {
        Self { timeout, interval }
    }
}

/// Where a verification currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyPhase {
    /// Waiting for the object to exist
    AwaitingPresence,
    /// Object seen, waiting for `Ready=True` on a fresh read
    AwaitingReady,
}

/// Point-in-time lookup. Lookup errors are logged and reported as absence.
pub async fn get_snapshot<C>(client: &C, id: &ResourceIdentity) -> Option<DynamicObject>
where
    C: ClusterApi + ?Sized,
{
    match client.get(id).await {
        Ok(obj) => obj,
        Err(e) => {
            warn!("Failed to get {}: {}", id, e);
            None
        }
    }
}

/// Wait until `id` exists and reports `Ready=True`, giving up after `policy.timeout`
pub async fn verify<C>(client: &C, id: &ResourceIdentity, policy: &PollPolicy) -> Result<DynamicObject>
where
    C: ClusterApi + ?Sized,
{
    verify_until(client, id, Instant::now() + policy.timeout, policy.interval).await
}

/// Wait until `id` exists and reports `Ready=True`, giving up at `deadline`.
///
/// Presence is established first; readiness is then judged only on objects
/// fetched after that point. On timeout the error names the last observed
/// state.
#[instrument(skip(client, deadline, interval), fields(resource = %id))]
pub async fn verify_until<C>(
    client: &C,
    id: &ResourceIdentity,
    deadline: Instant,
    interval: Duration,
) -> Result<DynamicObject>
where
    C: ClusterApi + ?Sized,
{
    let mut phase = VerifyPhase::AwaitingPresence;
    let mut last_observed: String;

    loop {
        let snapshot = get_snapshot(client, id).await;

        match (phase, snapshot) {
            (VerifyPhase::AwaitingPresence, Some(_)) => {
                info!("{} found, waiting for it to become ready", id);
                phase = VerifyPhase::AwaitingReady;
                continue;
            }
            (VerifyPhase::AwaitingReady, Some(obj)) if is_ready(&obj) => {
                info!("{} is ready", id);
                return Ok(obj);
            }
            (VerifyPhase::AwaitingReady, Some(obj)) => {
                last_observed = describe(&obj);
                debug!("{} not ready yet: {}", id, last_observed);
            }
            (_, None) => {
                last_observed = "absent".to_string();
                debug!("{} not found yet ({:?})", id, phase);
            }
        }

        let now = Instant::now();
        if now >= deadline {
            return Err(ScenarioError::VerificationTimeout {
                identity: id.to_string(),
                last_observed,
            });
        }
        sleep(interval.min(deadline - now)).await;
    }
}

/// Summary of an object's conditions for timeout reports
fn describe(obj: &DynamicObject) -> String {
    let conditions = conditions_of(obj);
    if conditions.is_empty() {
        return "present, no status conditions".to_string();
    }

    let summary: Vec<String> = conditions
        .iter()
        .map(|c| match &c.message {
            Some(msg) => format!("{}={} ({})", c.condition_type, c.status, msg),
            None => format!("{}={}", c.condition_type, c.status),
        })
        .collect();
    format!("present, conditions [{}]", summary.join(", "))
}
