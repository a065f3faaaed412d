// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lock manager configuration
//!
//! Loaded from TOML with humantime durations:
//!
//! ```toml
//! default_ttl = "5m"
//!
//! [rate_limit]
//! min_interval = "10s"
//! max_ops = 5
//! window = "1m"
//!
//! [sweep]
//! interval = "30s"
//! enabled = true
//! ```

use crate::coordination::MAX_TTL;
use crate::error::LockError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// TTL applied when a caller does not pass one
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// Top-level configuration for a `LockManager`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LockConfig {
    /// TTL used by `acquire`/`with_lock` when none is given
    #[serde(with = "humantime_serde")]
    pub default_ttl: Duration,
    /// Per-name throttling of `with_lock`; disabled when absent
    pub rate_limit: Option<RateLimitConfig>,
    /// Background removal of expired records
    pub sweep: SweepConfig,
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            default_ttl: DEFAULT_TTL,
            rate_limit: None,
            sweep: SweepConfig::default(),
        }
    }
}

impl LockConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }

    pub fn with_rate_limit(mut self, rate_limit: RateLimitConfig) -> Self {
        self.rate_limit = Some(rate_limit);
        self
    }

    pub fn with_sweep(mut self, sweep: SweepConfig) -> Self {
        self.sweep = sweep;
        self
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self, LockError> {
        let config: LockConfig =
            toml::from_str(source).map_err(|e| LockError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load(path: &Path) -> Result<Self, LockError> {
        let source = std::fs::read_to_string(path)
            .map_err(|e| LockError::Config(format!("failed to read {}: {}", path.display(), e)))?;
        Self::from_toml_str(&source)
    }

    /// Reject values the manager cannot work with
    pub fn validate(&self) -> Result<(), LockError> {
        if self.default_ttl.is_zero() {
            return Err(LockError::invalid("default_ttl must be positive"));
        }
        if self.default_ttl > MAX_TTL {
            return Err(LockError::invalid("ttl too large"));
        }
        if let Some(rate_limit) = &self.rate_limit {
            rate_limit.validate()?;
        }
        self.sweep.validate()
    }
}

/// Throttling applied to `with_lock` per lock name
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Minimum time between two successful runs
    #[serde(with = "humantime_serde")]
    pub min_interval: Duration,
    /// Maximum successful runs per window
    pub max_ops: u32,
    #[serde(with = "humantime_serde")]
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            min_interval: Duration::from_secs(10),
            max_ops: 5,
            window: Duration::from_secs(60),
        }
    }
}

impl RateLimitConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_interval(mut self, interval: Duration) -> Self {
        self.min_interval = interval;
        self
    }

    pub fn with_max_ops(mut self, max_ops: u32) -> Self {
        self.max_ops = max_ops;
        self
    }

    pub fn with_window(mut self, window: Duration) -> Self {
        self.window = window;
        self
    }

    fn validate(&self) -> Result<(), LockError> {
        if self.max_ops == 0 {
            return Err(LockError::invalid("rate_limit.max_ops must be positive"));
        }
        if self.window.is_zero() {
            return Err(LockError::invalid("rate_limit.window must be positive"));
        }
        Ok(())
    }
}

/// Configuration for the expiry sweep task
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// How often to drop expired records
    #[serde(with = "humantime_serde")]
    pub interval: Duration,
    pub enabled: bool,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(30),
            enabled: true,
        }
    }
}

impl SweepConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    fn validate(&self) -> Result<(), LockError> {
        if self.enabled && self.interval.is_zero() {
            return Err(LockError::invalid("sweep.interval must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
