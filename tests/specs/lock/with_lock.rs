use crate::prelude::*;
use similar_asserts::assert_eq;
use synclock_core::{RateLimitConfig, RateLimitDecision};
use tokio::sync::oneshot;

#[tokio::test]
async fn back_to_back_runs_only_one_proceeds() {
    let (manager, _) = manager();
    let (started_tx, started_rx) = oneshot::channel::<()>();
    let (finish_tx, finish_rx) = oneshot::channel::<()>();

    let first = tokio::spawn({
        let manager = manager.clone();
        async move {
            manager
                .with_lock("job", None, || async move {
                    let _ = started_tx.send(());
                    let _ = finish_rx.await;
                    Ok::<_, SyncError>(17)
                })
                .await
        }
    });
    started_rx.await.unwrap();

    let second = manager
        .with_lock("job", None, || async { Ok::<_, SyncError>(0) })
        .await
        .unwrap();
    assert_eq!(second, LockOutcome::NotAcquired);

    finish_tx.send(()).unwrap();
    assert_eq!(first.await.unwrap().unwrap(), LockOutcome::Ok(17));
}

#[tokio::test]
async fn failing_job_releases_and_reports_its_error() {
    let (manager, _) = manager();

    let result = manager
        .with_lock("churn-predictor", None, || async {
            Err::<(), _>(SyncError::Remote("503 from CRM".to_string()))
        })
        .await;

    assert_eq!(result, Err(SyncError::Remote("503 from CRM".to_string())));
    assert!(!manager.is_locked("churn-predictor"));
    assert!(manager.acquire("churn-predictor", None).unwrap().is_acquired());
}

#[tokio::test]
async fn rate_limited_job_does_not_run() {
    let (manager, clock) = manager_with(LockConfig::new().with_rate_limit(RateLimitConfig::default()));
    manager
        .with_lock("stripe-sync", None, || async { Ok::<_, SyncError>(()) })
        .await
        .unwrap();

    clock.advance(Duration::from_secs(1));
    let outcome = manager
        .with_lock("stripe-sync", None, || async { Ok::<_, SyncError>(()) })
        .await
        .unwrap();

    assert!(matches!(
        outcome,
        LockOutcome::RateLimited(RateLimitDecision::Limited { wait, .. }) if wait == Duration::from_secs(9)
    ));
}
