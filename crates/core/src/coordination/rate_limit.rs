// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-name throttling of locked runs
//!
//! Two rules apply to each name: a minimum gap between successful runs, and
//! a cap on successful runs inside a fixed window.

use crate::config::RateLimitConfig;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Outcome of a rate limit check
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RateLimitDecision {
    Allowed,
    Limited {
        /// How long until the next attempt would be allowed
        wait: Duration,
        /// Human readable explanation
        reason: String,
    },
}

impl RateLimitDecision {
    pub fn is_limited(&self) -> bool {
        matches!(self, RateLimitDecision::Limited { .. })
    }
}

#[derive(Clone, Debug)]
struct RunHistory {
    last_run: Instant,
    runs_in_window: u32,
    window_start: Instant,
}

#[derive(Debug)]
pub struct RateLimiter {
    config: RateLimitConfig,
    history: HashMap<String, RunHistory>,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            history: HashMap::new(),
        }
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    /// Whether a run of `name` may start at `now`
    pub fn check(&self, name: &str, now: Instant) -> RateLimitDecision {
        let Some(history) = self.history.get(name) else {
            return RateLimitDecision::Allowed;
        };

        let since_last = now.saturating_duration_since(history.last_run);
        if since_last < self.config.min_interval {
            let wait = self.config.min_interval - since_last;
            return RateLimitDecision::Limited {
                wait,
                reason: format!(
                    "please wait {} before trying again",
                    humantime::format_duration(round_up_to_secs(wait))
                ),
            };
        }

        let window_elapsed = now.saturating_duration_since(history.window_start);
        if window_elapsed < self.config.window && history.runs_in_window >= self.config.max_ops {
            let wait = self.config.window - window_elapsed;
            return RateLimitDecision::Limited {
                wait,
                reason: format!(
                    "rate limit exceeded, try again in {}",
                    humantime::format_duration(round_up_to_secs(wait))
                ),
            };
        }

        RateLimitDecision::Allowed
    }

    /// Count a successful run of `name` finishing at `now`
    pub fn record(&mut self, name: &str, now: Instant) {
        let window = self.config.window;
        match self.history.get_mut(name) {
            Some(history) if now.saturating_duration_since(history.window_start) < window => {
                history.last_run = now;
                history.runs_in_window += 1;
            }
            _ => {
                self.history.insert(
                    name.to_string(),
                    RunHistory {
                        last_run: now,
                        runs_in_window: 1,
                        window_start: now,
                    },
                );
            }
        }
    }

    /// Forget names whose history can no longer throttle a run at `now`
    ///
    /// An entry is dropped once both its minimum interval and its window
    /// have elapsed. Returns how many entries were removed.
    pub fn prune(&mut self, now: Instant) -> usize {
        let min_interval = self.config.min_interval;
        let window = self.config.window;
        let before = self.history.len();
        self.history.retain(|_, history| {
            now.saturating_duration_since(history.last_run) < min_interval
                || now.saturating_duration_since(history.window_start) < window
        });
        before - self.history.len()
    }

    /// Number of names with recorded history
    pub fn tracked(&self) -> usize {
        self.history.len()
    }
}

fn round_up_to_secs(duration: Duration) -> Duration {
    let secs = duration.as_secs() + u64::from(duration.subsec_nanos() > 0);
    Duration::from_secs(secs)
}

#[cfg(test)]
#[path = "rate_limit_tests.rs"]
mod tests;
