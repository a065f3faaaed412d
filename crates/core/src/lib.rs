// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! synclock-core: in-process advisory locks for background sync jobs
//!
//! This crate provides:
//! - Named locks with owner tokens and TTL expiry
//! - Scoped `with_lock` execution that always releases
//! - Listener fan-out on locked/unlocked transitions
//! - Optional per-name rate limiting and a background expiry sweep
//! - An injectable clock for deterministic tests

pub mod clock;
pub mod config;
pub mod coordination;
pub mod error;
pub mod operations;
pub mod token;

// Re-exports
pub use clock::{Clock, FakeClock, SystemClock};
pub use config::{LockConfig, RateLimitConfig, SweepConfig, DEFAULT_TTL};
pub use coordination::{
    AcquireOutcome, LockGuard, LockManager, LockOutcome, LockRecord, LockStats, RateLimitDecision,
    SubscriberId, Subscription, SweepHandle, MAX_TTL,
};
pub use error::LockError;
pub use token::{LockToken, SequentialTokenGen, TokenGen, UuidTokenGen};
