// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::clock::FakeClock;
use crate::config::LockConfig;
use crate::token::SequentialTokenGen;
use std::time::Duration;

fn test_manager() -> (LockManager<FakeClock, SequentialTokenGen>, FakeClock) {
    let clock = FakeClock::new();
    let manager = LockManager::with_parts(
        LockConfig::default(),
        clock.clone(),
        SequentialTokenGen::new("tok"),
    )
    .unwrap();
    (manager, clock)
}

#[test]
fn guard_exposes_name_and_token() {
    let (manager, _) = test_manager();
    let guard = manager.acquire_guard("sync", None).unwrap().unwrap();

    assert_eq!(guard.name(), "sync");
    assert_eq!(guard.token(), &LockToken::new("tok-1"));
    assert!(guard.is_held());
}

#[test]
fn dropping_guard_releases_lock() {
    let (manager, _) = test_manager();
    let guard = manager.acquire_guard("sync", None).unwrap().unwrap();
    assert!(manager.is_locked("sync"));

    drop(guard);

    assert!(!manager.is_locked("sync"));
}

#[test]
fn explicit_release_reports_success() {
    let (manager, _) = test_manager();
    let guard = manager.acquire_guard("sync", None).unwrap().unwrap();

    assert!(guard.release());
    assert!(!manager.is_locked("sync"));
}

#[test]
fn second_guard_is_refused_while_first_lives() {
    let (manager, _) = test_manager();
    let _guard = manager.acquire_guard("sync", None).unwrap().unwrap();

    assert!(manager.acquire_guard("sync", None).unwrap().is_none());
}

#[test]
fn expired_guard_does_not_release_new_holder() {
    let (manager, clock) = test_manager();
    let stale = manager
        .acquire_guard("sync", Some(Duration::from_secs(1)))
        .unwrap()
        .unwrap();

    clock.advance(Duration::from_secs(2));
    assert!(!stale.is_held());
    let fresh = manager.acquire("sync", None).unwrap();
    assert!(fresh.is_acquired());

    assert!(!stale.release());
    assert_eq!(
        manager.holder("sync").map(|r| r.owner_token),
        fresh.into_token()
    );
}

#[test]
fn guard_releases_during_unwind() {
    let (manager, _) = test_manager();
    let inner = manager.clone();

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || {
        let _guard = inner.acquire_guard("sync", None).unwrap().unwrap();
        panic!("job blew up");
    }));

    assert!(result.is_err());
    assert!(!manager.is_locked("sync"));
}
