// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory registry of held locks
//!
//! The store is the single owner of lock records. It is not synchronized on
//! its own; `LockManager` keeps it behind a mutex and never holds that mutex
//! across an await point.

use super::lock::LockRecord;
use crate::clock::Clock;
use crate::error::LockError;
use crate::token::{LockToken, TokenGen};
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug)]
pub struct LockStore<C: Clock, G: TokenGen> {
    records: HashMap<String, LockRecord>,
    clock: C,
    tokens: G,
    default_ttl: Duration,
}

impl<C: Clock, G: TokenGen> LockStore<C, G> {
    pub fn new(clock: C, tokens: G, default_ttl: Duration) -> Self {
        Self {
            records: HashMap::new(),
            clock,
            tokens,
            default_ttl,
        }
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Create a record for `name` unless a live one exists
    ///
    /// An expired record is replaced. Returns `None` without touching state
    /// when the current holder is still live, and an error when the expiry
    /// instant cannot be represented.
    pub fn try_put(
        &mut self,
        name: &str,
        ttl: Option<Duration>,
    ) -> Result<Option<LockRecord>, LockError> {
        let now = self.clock.now();

        if let Some(existing) = self.records.get(name) {
            if !existing.is_expired_at(now) {
                return Ok(None);
            }
        }

        let ttl = ttl.unwrap_or(self.default_ttl);
        let record = LockRecord::new(name, self.tokens.next(), now, ttl)?;
        if let Some(previous) = self.records.insert(name.to_string(), record.clone()) {
            tracing::info!(
                lock = name,
                previous_token = %previous.owner_token,
                "reclaiming expired lock"
            );
        }
        Ok(Some(record))
    }

    /// Delete the record for `name` if `token` owns it and it is still live
    ///
    /// An expired record is left for `remove_expired` even when the token
    /// matches; the caller already lost the lock when it expired.
    pub fn remove(&mut self, name: &str, token: &LockToken) -> bool {
        let now = self.clock.now();
        match self.records.get(name) {
            Some(record) if &record.owner_token == token && !record.is_expired_at(now) => {
                self.records.remove(name);
                true
            }
            _ => false,
        }
    }

    /// The live record for `name`, if any
    pub fn peek(&self, name: &str) -> Option<LockRecord> {
        let now = self.clock.now();
        self.records
            .get(name)
            .filter(|record| !record.is_expired_at(now))
            .cloned()
    }

    /// Drop every expired record, returning what was removed
    pub fn remove_expired(&mut self) -> Vec<LockRecord> {
        let now = self.clock.now();
        let expired: Vec<String> = self
            .records
            .iter()
            .filter(|(_, record)| record.is_expired_at(now))
            .map(|(name, _)| name.clone())
            .collect();

        expired
            .into_iter()
            .filter_map(|name| self.records.remove(&name))
            .collect()
    }

    /// All stored records, expired ones included
    pub fn records(&self) -> Vec<LockRecord> {
        self.records.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
