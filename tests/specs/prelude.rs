//! Shared helpers for specs.

pub use std::sync::{Arc, Mutex};
pub use std::time::Duration;
pub use synclock_core::{
    AcquireOutcome, FakeClock, LockConfig, LockError, LockManager, LockOutcome, LockToken,
    SequentialTokenGen, Subscription,
};

pub type SpecManager = LockManager<FakeClock, SequentialTokenGen>;

/// Manager on a fake clock with the default config
pub fn manager() -> (SpecManager, FakeClock) {
    manager_with(LockConfig::default())
}

pub fn manager_with(config: LockConfig) -> (SpecManager, FakeClock) {
    let clock = FakeClock::new();
    let manager = LockManager::with_parts(config, clock.clone(), SequentialTokenGen::new("spec"))
        .expect("valid config");
    (manager, clock)
}

/// Subscribe and collect every notification for `name`
pub fn watch(manager: &SpecManager, name: &str) -> (Subscription, Arc<Mutex<Vec<bool>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let sub = manager
        .subscribe(name, move |locked| sink.lock().unwrap().push(locked))
        .unwrap();
    (sub, seen)
}

/// Error type for job bodies run under `with_lock`
#[derive(Debug, PartialEq)]
pub enum SyncError {
    Lock(LockError),
    Remote(String),
}

impl From<LockError> for SyncError {
    fn from(e: LockError) -> Self {
        SyncError::Lock(e)
    }
}
