use crate::prelude::*;
use similar_asserts::assert_eq;

#[test]
fn second_acquire_of_live_lock_is_refused() {
    let (manager, _) = manager();

    let first = manager.acquire("hubspot-sync", None).unwrap();
    let second = manager.acquire("hubspot-sync", None).unwrap();

    assert!(first.is_acquired());
    assert_eq!(second, AcquireOutcome::NotAcquired);
}

#[test]
fn different_names_do_not_contend() {
    let (manager, _) = manager();

    for name in synclock_core::operations::ALL {
        assert!(manager.acquire(name, None).unwrap().is_acquired(), "{name}");
    }
    assert_eq!(manager.stats().held, synclock_core::operations::ALL.len());
}

#[test]
fn foreign_token_cannot_release_and_owner_still_can() {
    let (manager, _) = manager();
    let token = manager
        .acquire("stripe-sync", None)
        .unwrap()
        .into_token()
        .unwrap();

    assert!(!manager.release("stripe-sync", &LockToken::new("not-mine")).unwrap());
    assert!(manager.is_locked("stripe-sync"));

    assert!(manager.release("stripe-sync", &token).unwrap());
    assert!(!manager.is_locked("stripe-sync"));
}

#[test]
fn release_of_unknown_lock_is_false() {
    let (manager, _) = manager();
    assert!(!manager.release("never-held", &LockToken::new("spec-1")).unwrap());
}

#[test]
fn empty_name_is_invalid() {
    let (manager, _) = manager();
    assert!(matches!(
        manager.acquire("", None),
        Err(LockError::InvalidArgument(_))
    ));
}
