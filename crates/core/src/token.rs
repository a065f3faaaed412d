// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Owner tokens identifying a single lock acquisition

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Opaque proof of ownership handed out by a successful acquire
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LockToken(pub String);

impl LockToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for LockToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Mints a fresh token for every acquisition
pub trait TokenGen: Clone + Send + Sync + 'static {
    fn next(&self) -> LockToken;
}

/// UUID-based tokens for production use
#[derive(Clone, Debug, Default)]
pub struct UuidTokenGen;

impl TokenGen for UuidTokenGen {
    fn next(&self) -> LockToken {
        LockToken(uuid::Uuid::new_v4().to_string())
    }
}

/// Predictable tokens for testing
#[derive(Clone, Debug)]
pub struct SequentialTokenGen {
    prefix: String,
    counter: Arc<AtomicU64>,
}

impl SequentialTokenGen {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: Arc::new(AtomicU64::new(1)),
        }
    }
}

impl Default for SequentialTokenGen {
    fn default() -> Self {
        Self::new("token")
    }
}

impl TokenGen for SequentialTokenGen {
    fn next(&self) -> LockToken {
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        LockToken(format!("{}-{}", self.prefix, n))
    }
}
