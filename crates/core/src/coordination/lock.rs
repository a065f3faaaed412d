// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lock records and acquisition outcomes

use crate::clock::Clock;
use crate::error::LockError;
use crate::token::LockToken;
use std::time::{Duration, Instant};

/// State of one held lock
///
/// Records are never mutated; reacquiring a name produces a new record with
/// a new token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LockRecord {
    pub name: String,
    pub owner_token: LockToken,
    pub acquired_at: Instant,
    /// After this instant the holder is considered gone
    pub expires_at: Instant,
}

/// Longest TTL a lock may carry
pub const MAX_TTL: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

impl LockRecord {
    /// Fails when `now + ttl` is not representable as an `Instant`
    pub fn new(
        name: impl Into<String>,
        owner_token: LockToken,
        now: Instant,
        ttl: Duration,
    ) -> Result<Self, LockError> {
        let expires_at = now
            .checked_add(ttl)
            .ok_or_else(|| LockError::invalid("ttl too large"))?;
        Ok(Self {
            name: name.into(),
            owner_token,
            acquired_at: now,
            expires_at,
        })
    }

    /// Expired records are logically absent
    pub fn is_expired_at(&self, now: Instant) -> bool {
        self.expires_at <= now
    }

    pub fn is_expired(&self, clock: &impl Clock) -> bool {
        self.is_expired_at(clock.now())
    }

    /// Time left before expiry, zero once expired
    pub fn remaining(&self, now: Instant) -> Duration {
        self.expires_at.saturating_duration_since(now)
    }

    pub fn ttl(&self) -> Duration {
        self.expires_at.duration_since(self.acquired_at)
    }
}

/// Result of a plain `acquire`
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AcquireOutcome {
    Acquired(LockToken),
    /// Someone else holds a live lock on the name
    NotAcquired,
}

impl AcquireOutcome {
    pub fn is_acquired(&self) -> bool {
        matches!(self, AcquireOutcome::Acquired(_))
    }

    pub fn token(&self) -> Option<&LockToken> {
        match self {
            AcquireOutcome::Acquired(token) => Some(token),
            AcquireOutcome::NotAcquired => None,
        }
    }

    pub fn into_token(self) -> Option<LockToken> {
        match self {
            AcquireOutcome::Acquired(token) => Some(token),
            AcquireOutcome::NotAcquired => None,
        }
    }
}

pub(crate) fn validate_name(name: &str) -> Result<(), LockError> {
    if name.is_empty() {
        return Err(LockError::invalid("lock name must not be empty"));
    }
    Ok(())
}

pub(crate) fn validate_ttl(ttl: Duration) -> Result<(), LockError> {
    if ttl.is_zero() {
        return Err(LockError::invalid("ttl must be positive"));
    }
    if ttl > MAX_TTL {
        return Err(LockError::invalid("ttl too large"));
    }
    Ok(())
}

pub(crate) fn validate_token(token: &LockToken) -> Result<(), LockError> {
    if token.is_empty() {
        return Err(LockError::invalid("lock token must not be empty"));
    }
    Ok(())
}

#[cfg(test)]
#[path = "lock_tests.rs"]
mod tests;
