// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scoped lock ownership
//!
//! A `LockGuard` releases its lock when dropped, so unwinding and dropped
//! futures cannot leak a held lock.

use super::manager::LockManager;
use crate::clock::Clock;
use crate::token::{LockToken, TokenGen};

#[must_use = "dropping the guard releases the lock immediately"]
#[derive(Debug)]
pub struct LockGuard<C: Clock, G: TokenGen> {
    manager: LockManager<C, G>,
    name: String,
    token: LockToken,
    released: bool,
}

impl<C: Clock, G: TokenGen> LockGuard<C, G> {
    pub(crate) fn new(manager: LockManager<C, G>, name: String, token: LockToken) -> Self {
        Self {
            manager,
            name,
            token,
            released: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn token(&self) -> &LockToken {
        &self.token
    }

    /// Whether this guard's acquisition is still the live holder
    pub fn is_held(&self) -> bool {
        self.manager
            .holder(&self.name)
            .is_some_and(|record| record.owner_token == self.token)
    }

    /// Release now. Returns false if the lock had expired and was reclaimed.
    pub fn release(mut self) -> bool {
        self.released = true;
        self.manager.release_unchecked(&self.name, &self.token)
    }
}

impl<C: Clock, G: TokenGen> Drop for LockGuard<C, G> {
    fn drop(&mut self) {
        if !self.released {
            self.released = true;
            self.manager.release_unchecked(&self.name, &self.token);
        }
    }
}

#[cfg(test)]
#[path = "guard_tests.rs"]
mod tests;
