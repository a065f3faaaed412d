// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lock manager: the public face of the lock store
//!
//! All reads and writes of lock state go through here. The manager is cheap
//! to clone; clones share the same store, subscribers and rate limiter.

use super::guard::LockGuard;
use super::lock::{validate_name, validate_token, validate_ttl, AcquireOutcome, LockRecord};
use super::maintenance::{LockStats, SweepHandle, SweepTask};
use super::rate_limit::{RateLimitDecision, RateLimiter};
use super::store::LockStore;
use super::subscribers::{SubscriberRegistry, Subscription};
use crate::clock::{Clock, SystemClock};
use crate::config::LockConfig;
use crate::error::LockError;
use crate::token::{LockToken, TokenGen, UuidTokenGen};
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// Result of `with_lock`
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LockOutcome<T> {
    /// The lock was held while the work ran to completion
    Ok(T),
    /// Another holder has the lock; the work did not run
    NotAcquired,
    /// The name ran too recently; the work did not run
    RateLimited(RateLimitDecision),
}

impl<T> LockOutcome<T> {
    pub fn is_ok(&self) -> bool {
        matches!(self, LockOutcome::Ok(_))
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            LockOutcome::Ok(value) => Some(value),
            LockOutcome::NotAcquired | LockOutcome::RateLimited(_) => None,
        }
    }
}

#[derive(Debug)]
pub struct LockManager<C: Clock = SystemClock, G: TokenGen = UuidTokenGen> {
    store: Arc<Mutex<LockStore<C, G>>>,
    subscribers: SubscriberRegistry,
    rate_limiter: Option<Arc<Mutex<RateLimiter>>>,
    clock: C,
    config: Arc<LockConfig>,
}

impl<C: Clock, G: TokenGen> Clone for LockManager<C, G> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            subscribers: self.subscribers.clone(),
            rate_limiter: self.rate_limiter.clone(),
            clock: self.clock.clone(),
            config: Arc::clone(&self.config),
        }
    }
}

impl LockManager {
    /// Manager on the system clock with UUID tokens
    pub fn new(config: LockConfig) -> Result<Self, LockError> {
        Self::with_parts(config, SystemClock, UuidTokenGen)
    }
}

impl<C: Clock, G: TokenGen> LockManager<C, G> {
    pub fn with_parts(config: LockConfig, clock: C, tokens: G) -> Result<Self, LockError> {
        config.validate()?;
        let store = LockStore::new(clock.clone(), tokens, config.default_ttl);
        let rate_limiter = config
            .rate_limit
            .clone()
            .map(|rate_limit| Arc::new(Mutex::new(RateLimiter::new(rate_limit))));

        Ok(Self {
            store: Arc::new(Mutex::new(store)),
            subscribers: SubscriberRegistry::new(),
            rate_limiter,
            clock,
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &LockConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn store(&self) -> MutexGuard<'_, LockStore<C, G>> {
        self.store.lock().unwrap_or_else(|e| e.into_inner())
    }

    // === Lock Operations ===

    /// Try to take `name` for `ttl` (or the configured default)
    pub fn acquire(&self, name: &str, ttl: Option<Duration>) -> Result<AcquireOutcome, LockError> {
        validate_name(name)?;
        if let Some(ttl) = ttl {
            validate_ttl(ttl)?;
        }

        let acquired = {
            let mut store = self.store();
            let acquired = store.try_put(name, ttl)?;
            if acquired.is_some() {
                self.subscribers.enqueue(name, true);
            }
            acquired
        };
        match acquired {
            Some(record) => {
                tracing::debug!(
                    lock = name,
                    token = %record.owner_token,
                    ttl = ?record.ttl(),
                    "lock acquired"
                );
                self.subscribers.drain();
                Ok(AcquireOutcome::Acquired(record.owner_token))
            }
            None => {
                tracing::debug!(lock = name, "lock already held");
                Ok(AcquireOutcome::NotAcquired)
            }
        }
    }

    /// Release `name` if `token` still owns it
    ///
    /// Returns false when the token does not match the holder, or when the
    /// lock is absent or has already been reclaimed.
    pub fn release(&self, name: &str, token: &LockToken) -> Result<bool, LockError> {
        validate_name(name)?;
        validate_token(token)?;
        Ok(self.release_unchecked(name, token))
    }

    pub(crate) fn release_unchecked(&self, name: &str, token: &LockToken) -> bool {
        let removed = {
            let mut store = self.store();
            let removed = store.remove(name, token);
            if removed {
                self.subscribers.enqueue(name, false);
            }
            removed
        };
        if removed {
            tracing::debug!(lock = name, token = %token, "lock released");
            self.subscribers.drain();
        } else {
            tracing::warn!(lock = name, token = %token, "release ignored, token does not own the lock");
        }
        removed
    }

    /// Whether `name` has a live holder
    pub fn is_locked(&self, name: &str) -> bool {
        self.store().peek(name).is_some()
    }

    /// The live record for `name`
    pub fn holder(&self, name: &str) -> Option<LockRecord> {
        self.store().peek(name)
    }

    /// Names with a stored record, expired ones included until swept
    pub fn lock_names(&self) -> Vec<String> {
        self.store().records().into_iter().map(|r| r.name).collect()
    }

    /// Acquire `name` and get a guard that releases it when dropped
    pub fn acquire_guard(
        &self,
        name: &str,
        ttl: Option<Duration>,
    ) -> Result<Option<LockGuard<C, G>>, LockError> {
        match self.acquire(name, ttl)? {
            AcquireOutcome::Acquired(token) => {
                Ok(Some(LockGuard::new(self.clone(), name.to_string(), token)))
            }
            AcquireOutcome::NotAcquired => Ok(None),
        }
    }

    /// Run `f` while holding `name`
    ///
    /// `f` is never called when the lock is held elsewhere or the name is
    /// rate limited. Once acquired, the lock is released however `f` ends:
    /// returning, failing, panicking, or the returned future being dropped.
    /// Errors from `f` are passed through after the release.
    pub async fn with_lock<T, E, F, Fut>(
        &self,
        name: &str,
        ttl: Option<Duration>,
        f: F,
    ) -> Result<LockOutcome<T>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: From<LockError>,
    {
        validate_name(name)?;
        let decision = self.check_rate_limit(name)?;
        if decision.is_limited() {
            tracing::warn!(lock = name, ?decision, "skipping locked run, rate limited");
            return Ok(LockOutcome::RateLimited(decision));
        }
        self.with_lock_unthrottled(name, ttl, f).await
    }

    /// `with_lock` without consulting the rate limiter
    ///
    /// A successful run still counts towards the limit.
    pub async fn with_lock_unthrottled<T, E, F, Fut>(
        &self,
        name: &str,
        ttl: Option<Duration>,
        f: F,
    ) -> Result<LockOutcome<T>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: From<LockError>,
    {
        let Some(guard) = self.acquire_guard(name, ttl)? else {
            tracing::debug!(lock = name, "skipping locked run, already in progress");
            return Ok(LockOutcome::NotAcquired);
        };

        let result = f().await;
        guard.release();

        let value = result?;
        self.record_run(name);
        Ok(LockOutcome::Ok(value))
    }

    // === Subscribers ===

    /// Listen for locked/unlocked transitions of `name`
    pub fn subscribe<F>(&self, name: &str, listener: F) -> Result<Subscription, LockError>
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        validate_name(name)?;
        Ok(self.subscribers.subscribe(name, listener))
    }

    pub fn subscriber_count(&self, name: &str) -> usize {
        self.subscribers.subscriber_count(name)
    }

    // === Rate Limiting ===

    /// Whether a `with_lock` on `name` would be throttled now
    ///
    /// Always `Allowed` when no rate limit is configured.
    pub fn check_rate_limit(&self, name: &str) -> Result<RateLimitDecision, LockError> {
        validate_name(name)?;
        let Some(limiter) = &self.rate_limiter else {
            return Ok(RateLimitDecision::Allowed);
        };
        let limiter = limiter.lock().unwrap_or_else(|e| e.into_inner());
        Ok(limiter.check(name, self.clock.now()))
    }

    fn record_run(&self, name: &str) {
        if let Some(limiter) = &self.rate_limiter {
            limiter
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .record(name, self.clock.now());
        }
    }

    // === Maintenance ===

    /// Drop expired records and tell their listeners the lock is free
    ///
    /// Also forgets rate-limit history that can no longer throttle anything.
    pub fn sweep_expired(&self) -> Vec<LockRecord> {
        let swept = {
            let mut store = self.store();
            let swept = store.remove_expired();
            for record in &swept {
                self.subscribers.enqueue(&record.name, false);
            }
            swept
        };
        for record in &swept {
            tracing::info!(lock = %record.name, token = %record.owner_token, "swept expired lock");
        }
        self.subscribers.drain();
        self.prune_rate_limits();
        swept
    }

    fn prune_rate_limits(&self) {
        if let Some(limiter) = &self.rate_limiter {
            let pruned = limiter
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .prune(self.clock.now());
            if pruned > 0 {
                tracing::debug!(pruned, "dropped idle rate limit history");
            }
        }
    }

    /// Names the rate limiter currently keeps history for
    pub fn rate_limited_names(&self) -> usize {
        self.rate_limiter.as_ref().map_or(0, |limiter| {
            limiter.lock().unwrap_or_else(|e| e.into_inner()).tracked()
        })
    }

    /// Counts of stored, live and expired records
    pub fn stats(&self) -> LockStats {
        LockStats::collect(&self.store().records(), self.clock.now())
    }

    /// Start the background sweep if it is enabled in the config
    pub fn spawn_sweeper(&self) -> Option<SweepHandle> {
        if !self.config.sweep.enabled {
            return None;
        }
        Some(SweepTask::new(self.clone(), self.config.sweep.clone()).spawn())
    }
}

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;
