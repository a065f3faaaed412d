// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Named advisory locks for background jobs
//!
//! This module provides:
//! - **LockStore** - Authoritative name to record mapping with TTL expiry
//! - **LockManager** - acquire / release / with_lock over the store
//! - **LockGuard** - Release on drop for scoped acquisition
//! - **SubscriberRegistry** - Locked/unlocked notifications per name
//! - **RateLimiter** - Optional throttling of locked runs
//! - **SweepTask** - Background removal of expired records

pub mod guard;
pub mod lock;
pub mod maintenance;
pub mod manager;
pub mod rate_limit;
pub mod store;
pub mod subscribers;

pub use guard::LockGuard;
pub use lock::{AcquireOutcome, LockRecord, MAX_TTL};
pub use maintenance::{LockStats, SweepHandle, SweepTask};
pub use manager::{LockManager, LockOutcome};
pub use rate_limit::{RateLimitDecision, RateLimiter};
pub use store::LockStore;
pub use subscribers::{Listener, SubscriberId, SubscriberRegistry, Subscription};
