// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Periodic removal of expired lock records
//!
//! Expiry is already computed on read, so the sweep only bounds memory held
//! by abandoned names and tells listeners those locks are free.

use super::lock::LockRecord;
use super::manager::LockManager;
use crate::clock::Clock;
use crate::config::SweepConfig;
use crate::token::TokenGen;
use std::time::{Duration, Instant};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Background sweep over a manager's expired records
pub struct SweepTask<C: Clock, G: TokenGen> {
    manager: LockManager<C, G>,
    config: SweepConfig,
}

impl<C: Clock, G: TokenGen> SweepTask<C, G> {
    pub fn new(manager: LockManager<C, G>, config: SweepConfig) -> Self {
        Self { manager, config }
    }

    /// Run a single sweep cycle
    pub fn tick(&self) -> Vec<LockRecord> {
        self.manager.sweep_expired()
    }

    /// Get the sweep interval
    pub fn interval(&self) -> Duration {
        self.config.interval
    }

    /// Sweep every interval until `shutdown` flips to true or its sender drops
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        if !self.config.enabled || self.config.interval.is_zero() {
            return;
        }

        let mut ticker = tokio::time::interval(self.config.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let swept = self.tick();
                    if !swept.is_empty() {
                        tracing::debug!(count = swept.len(), "sweep removed expired locks");
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }
        tracing::debug!("lock sweep stopped");
    }

    /// Run on the current tokio runtime
    pub fn spawn(self) -> SweepHandle {
        let (shutdown, rx) = watch::channel(false);
        let join = tokio::spawn(self.run(rx));
        SweepHandle { shutdown, join }
    }
}

/// Handle to a spawned sweep task
#[derive(Debug)]
pub struct SweepHandle {
    shutdown: watch::Sender<bool>,
    join: JoinHandle<()>,
}

impl SweepHandle {
    /// Stop the sweep and wait for it to exit
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        if let Err(e) = self.join.await {
            tracing::warn!(error = %e, "lock sweep task failed");
        }
    }
}

/// Statistics about stored lock records
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LockStats {
    pub total: usize,
    pub held: usize,
    /// Expired but not yet swept
    pub expired: usize,
}

impl LockStats {
    pub fn collect(records: &[LockRecord], now: Instant) -> Self {
        let expired = records.iter().filter(|r| r.is_expired_at(now)).count();
        Self {
            total: records.len(),
            held: records.len() - expired,
            expired,
        }
    }
}

#[cfg(test)]
#[path = "maintenance_tests.rs"]
mod tests;
