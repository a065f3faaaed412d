use crate::prelude::*;
use similar_asserts::assert_eq;

#[test]
fn ttl_race_on_hubspot_sync() {
    let (manager, clock) = manager();

    let first = manager
        .acquire("sync-hubspot", Some(Duration::from_millis(1000)))
        .unwrap()
        .into_token()
        .unwrap();

    clock.advance_ms(500);
    assert_eq!(
        manager.acquire("sync-hubspot", None).unwrap(),
        AcquireOutcome::NotAcquired
    );

    clock.advance_ms(501);
    let second = manager
        .acquire("sync-hubspot", None)
        .unwrap()
        .into_token()
        .unwrap();

    assert!(first != second);
}

#[test]
fn abandoned_lock_becomes_acquirable_without_release() {
    let (manager, clock) = manager_with(LockConfig::new().with_default_ttl(Duration::from_secs(120)));
    manager.acquire("daily-report", None).unwrap();

    clock.advance(Duration::from_secs(119));
    assert!(manager.is_locked("daily-report"));

    clock.advance(Duration::from_secs(1));
    assert!(!manager.is_locked("daily-report"));
    assert!(manager.acquire("daily-report", None).unwrap().is_acquired());
}

#[test]
fn zero_ttl_is_invalid() {
    let (manager, _) = manager();
    assert!(matches!(
        manager.acquire("daily-report", Some(Duration::ZERO)),
        Err(LockError::InvalidArgument(_))
    ));
}

#[test]
fn sweep_drops_expired_records() {
    let (manager, clock) = manager();
    manager.acquire("bi-agent", Some(Duration::from_secs(1))).unwrap();
    clock.advance(Duration::from_secs(2));

    assert_eq!(manager.stats().expired, 1);
    assert_eq!(manager.sweep_expired().len(), 1);
    assert_eq!(manager.stats().total, 0);
}
