//! Registry of running cancellable effects.
//!
//! Every `Effect::Cancellable` runs in its own task. The registry owns the
//! task's abort handle under the effect's id, so the store can cancel it from
//! a reducer (`Effect::Cancel`) or synchronously during teardown.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::task::AbortHandle;
use venue_core::effect::EffectId;

/// A registered task and the generation it was registered with
#[derive(Debug)]
struct Registration {
    generation: u64,
    handle: AbortHandle,
}

/// Shared registry of cancellable tasks, keyed by [`EffectId`]
#[derive(Debug, Clone, Default)]
pub(crate) struct CancellationRegistry {
    tasks: Arc<Mutex<HashMap<EffectId, Registration>>>,
    generations: Arc<AtomicU64>,
}

impl CancellationRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    // A poisoned lock only means another thread panicked mid-insert; the map
    // itself is still consistent, so keep using it.
    fn lock(&self) -> MutexGuard<'_, HashMap<EffectId, Registration>> {
        self.tasks
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Spawn `task` under `id`, aborting whatever was registered there before.
    ///
    /// `make_task` receives the generation of the new registration so the task
    /// can deregister itself on completion without removing a successor.
    pub(crate) fn spawn<F, Fut>(&self, id: EffectId, make_task: F) -> bool
    where
        F: FnOnce(u64) -> Fut,
        Fut: std::future::Future<Output = ()> + Send + 'static,
    {
        let generation = self.generations.fetch_add(1, Ordering::Relaxed);

        // Hold the lock across spawn so the task cannot deregister before it is registered.
        let mut tasks = self.lock();
        let handle = tokio::spawn(make_task(generation)).abort_handle();
        let previous = tasks.insert(id, Registration { generation, handle });

        match previous {
            Some(previous) => {
                previous.handle.abort();
                true
            },
            None => false,
        }
    }

    /// Remove the registration for `id` if it still belongs to `generation`.
    pub(crate) fn finish(&self, id: &EffectId, generation: u64) {
        let mut tasks = self.lock();
        if tasks.get(id).is_some_and(|r| r.generation == generation) {
            tasks.remove(id);
        }
    }

    /// Abort the task registered under `id`. Returns whether one was running.
    pub(crate) fn cancel(&self, id: &EffectId) -> bool {
        let removed = self.lock().remove(id);
        match removed {
            Some(registration) => {
                registration.handle.abort();
                true
            },
            None => false,
        }
    }

    /// Abort every registered task. Returns how many were aborted.
    pub(crate) fn cancel_all(&self) -> usize {
        let drained: Vec<_> = self.lock().drain().collect();
        for (_, registration) in &drained {
            registration.handle.abort();
        }
        drained.len()
    }

    /// Whether a task is currently registered under `id`
    pub(crate) fn is_active(&self, id: &EffectId) -> bool {
        self.lock().contains_key(id)
    }

    /// Ids of all currently registered tasks, sorted
    pub(crate) fn active_ids(&self) -> Vec<EffectId> {
        let mut ids: Vec<_> = self.lock().keys().cloned().collect();
        ids.sort();
        ids
    }
}
