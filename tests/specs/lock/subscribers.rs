use crate::prelude::*;
use similar_asserts::assert_eq;

#[test]
fn failing_listener_does_not_starve_the_next_one() {
    let (manager, _) = manager();
    let _noisy = manager
        .subscribe("interventions", |_| panic!("toast renderer crashed"))
        .unwrap();
    let (_sub, seen) = watch(&manager, "interventions");

    let token = manager
        .acquire("interventions", None)
        .unwrap()
        .into_token()
        .unwrap();
    manager.release("interventions", &token).unwrap();

    assert_eq!(*seen.lock().unwrap(), vec![true, false]);
}

#[test]
fn unsubscribe_is_idempotent() {
    let (manager, _) = manager();
    let (sub, seen) = watch(&manager, "interventions");

    sub.unsubscribe();
    sub.unsubscribe();
    manager.acquire("interventions", None).unwrap();

    assert!(seen.lock().unwrap().is_empty());
}

#[test]
fn listener_that_restarts_the_job_leaves_others_in_sync() {
    let (manager, _) = manager();
    let restarter = manager.clone();
    let _restart = manager
        .subscribe("daily-report", move |locked| {
            if !locked {
                restarter.acquire("daily-report", None).unwrap();
            }
        })
        .unwrap();
    let (_sub, seen) = watch(&manager, "daily-report");

    let token = manager
        .acquire("daily-report", None)
        .unwrap()
        .into_token()
        .unwrap();
    manager.release("daily-report", &token).unwrap();

    assert!(manager.is_locked("daily-report"));
    assert_eq!(*seen.lock().unwrap(), vec![true, false, true]);
}
