// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the lock manager

use thiserror::Error;

/// Errors surfaced to callers of the lock manager
///
/// Losing a lock race is not an error; see `AcquireOutcome` and `LockOutcome`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LockError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("config error: {0}")]
    Config(String),
}

impl LockError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        LockError::InvalidArgument(message.into())
    }
}
