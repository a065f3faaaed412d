// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clock abstraction for lock expiry checks

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Source of time for expiry checks
///
/// Implementations must never return an instant earlier than one they
/// returned before; expiry math assumes time only moves forward.
pub trait Clock: Clone + Send + Sync + 'static {
    fn now(&self) -> Instant;
}

/// Real system clock
#[derive(Clone, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Manually driven clock for tests
///
/// Clones share the same underlying time, so a clock handed to a
/// `LockManager` can still be advanced from the test body.
#[derive(Clone, Debug)]
pub struct FakeClock {
    origin: Instant,
    current: Arc<Mutex<Instant>>,
}

impl FakeClock {
    pub fn new() -> Self {
        let origin = Instant::now();
        Self {
            origin,
            current: Arc::new(Mutex::new(origin)),
        }
    }

    /// Advance the clock by the given duration
    pub fn advance(&self, duration: Duration) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        *current += duration;
    }

    /// Advance the clock by a number of milliseconds
    pub fn advance_ms(&self, millis: u64) {
        self.advance(Duration::from_millis(millis));
    }

    /// Move the clock to `instant`. Earlier instants are ignored.
    pub fn set(&self, instant: Instant) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        if instant > *current {
            *current = instant;
        }
    }

    /// Time elapsed since the clock was created
    pub fn elapsed(&self) -> Duration {
        self.now().duration_since(self.origin)
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Instant {
        *self.current.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
