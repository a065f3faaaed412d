// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fan-out of locked/unlocked transitions to listeners

use std::collections::{HashMap, VecDeque};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex};

/// Callback invoked with the new locked state of a name
pub type Listener = Arc<dyn Fn(bool) + Send + Sync>;

/// Handle identifying one registered listener
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriberId(pub u64);

struct Entry {
    id: SubscriberId,
    listener: Listener,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    by_name: HashMap<String, Vec<Entry>>,
    /// Transitions not yet delivered, oldest first
    pending: VecDeque<(String, bool)>,
    /// Set while some caller is delivering `pending`
    draining: bool,
}

/// Listeners keyed by lock name, invoked in registration order
///
/// Transitions are delivered in the order they were enqueued. Only one
/// caller delivers at a time; a transition enqueued while another caller
/// (or a listener further up the stack) is delivering is handed to that
/// caller instead of being delivered out of order.
#[derive(Clone, Default)]
pub struct SubscriberRegistry {
    inner: Arc<Mutex<Registry>>,
}

impl SubscriberRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` for transitions of `name`
    pub fn subscribe<F>(&self, name: &str, listener: F) -> Subscription
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.next_id += 1;
        let id = SubscriberId(inner.next_id);
        inner.by_name.entry(name.to_string()).or_default().push(Entry {
            id,
            listener: Arc::new(listener),
        });

        Subscription {
            registry: self.clone(),
            name: name.to_string(),
            id,
        }
    }

    /// Remove one listener. Returns false if it was already gone.
    pub fn unsubscribe(&self, name: &str, id: SubscriberId) -> bool {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        let Some(entries) = inner.by_name.get_mut(name) else {
            return false;
        };
        let before = entries.len();
        entries.retain(|entry| entry.id != id);
        let removed = entries.len() != before;
        if entries.is_empty() {
            inner.by_name.remove(name);
        }
        removed
    }

    /// Enqueue and deliver a transition of `name`
    pub fn notify(&self, name: &str, is_locked: bool) {
        self.enqueue(name, is_locked);
        self.drain();
    }

    /// Queue a transition of `name` without running any listener
    ///
    /// Callers enqueue while still holding the lock that guards the state
    /// change, so queue order matches the order of the changes.
    pub fn enqueue(&self, name: &str, is_locked: bool) {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        if !inner.by_name.contains_key(name) {
            return;
        }
        inner.pending.push_back((name.to_string(), is_locked));
    }

    /// Deliver queued transitions until the queue is empty
    ///
    /// Listeners are snapshotted per transition and run without the
    /// registry lock held, so they may subscribe, unsubscribe or call back
    /// into the manager. A panicking listener is logged and skipped.
    /// Returns immediately if another caller is already delivering.
    pub fn drain(&self) {
        {
            let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
            if inner.draining {
                return;
            }
            inner.draining = true;
        }

        loop {
            let (name, is_locked, listeners) = {
                let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
                let Some((name, is_locked)) = inner.pending.pop_front() else {
                    inner.draining = false;
                    return;
                };
                let listeners: Vec<(SubscriberId, Listener)> = inner
                    .by_name
                    .get(&name)
                    .map(|entries| {
                        entries
                            .iter()
                            .map(|entry| (entry.id, Arc::clone(&entry.listener)))
                            .collect()
                    })
                    .unwrap_or_default();
                (name, is_locked, listeners)
            };

            for (id, listener) in listeners {
                if catch_unwind(AssertUnwindSafe(|| listener(is_locked))).is_err() {
                    tracing::warn!(lock = %name, subscriber = id.0, is_locked, "lock listener panicked");
                }
            }
        }
    }

    /// Transitions waiting to be delivered
    pub fn pending(&self) -> usize {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).pending.len()
    }

    /// Number of listeners registered for `name`
    pub fn subscriber_count(&self, name: &str) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .by_name
            .get(name)
            .map_or(0, Vec::len)
    }
}

impl std::fmt::Debug for SubscriberRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        f.debug_struct("SubscriberRegistry")
            .field("names", &inner.by_name.len())
            .field("pending", &inner.pending.len())
            .finish()
    }
}

/// Returned by `subscribe`; dropping it does not unsubscribe
#[must_use = "keep the subscription to be able to unsubscribe"]
#[derive(Debug)]
pub struct Subscription {
    registry: SubscriberRegistry,
    name: String,
    id: SubscriberId,
}

impl Subscription {
    pub fn id(&self) -> SubscriberId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Stop receiving notifications. Calling this again is a no-op.
    pub fn unsubscribe(&self) {
        self.registry.unsubscribe(&self.name, self.id);
    }
}

#[cfg(test)]
#[path = "subscribers_tests.rs"]
mod tests;
