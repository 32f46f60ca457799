//! Registry of cancellable effect tasks.
//!
//! Every task spawned while executing an `Effect::Cancellable` registers its
//! [`AbortHandle`] under the effect's [`EffectId`]. Cancelling an id aborts
//! all of its outstanding tasks. Registering only prunes finished tasks and
//! records the new handle; cancel-on-replace is done by the store, which
//! cancels the id before executing a new `Effect::Cancellable` under it.

use medify_core::effect::EffectId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::task::AbortHandle;

/// Shared map from cancellation id to the abort handles of its tasks.
#[derive(Debug, Clone, Default)]
pub struct CancellationRegistry {
    handles: Arc<Mutex<HashMap<EffectId, Vec<AbortHandle>>>>,
}

impl CancellationRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a spawned task under `id`.
    ///
    /// Finished tasks still listed under the id are pruned first.
    pub fn register(&self, id: &EffectId, handle: AbortHandle) {
        let Ok(mut handles) = self.handles.lock() else {
            tracing::error!(effect_id = %id, "Cancellation registry poisoned, aborting task");
            handle.abort();
            return;
        };

        let entry = handles.entry(id.clone()).or_default();
        entry.retain(|h| !h.is_finished());
        entry.push(handle);
    }

    /// Abort every outstanding task registered under `id`.
    ///
    /// Returns how many unfinished tasks were aborted.
    pub fn cancel(&self, id: &EffectId) -> usize {
        let removed = match self.handles.lock() {
            Ok(mut handles) => handles.remove(id).unwrap_or_default(),
            Err(_) => {
                tracing::error!(effect_id = %id, "Cancellation registry poisoned");
                Vec::new()
            },
        };

        let mut aborted = 0;
        for handle in removed {
            if !handle.is_finished() {
                handle.abort();
                aborted += 1;
            }
        }
        aborted
    }

    /// Number of unfinished tasks registered under `id`.
    #[must_use]
    pub fn outstanding(&self, id: &EffectId) -> usize {
        self.handles.lock().map_or(0, |handles| {
            handles
                .get(id)
                .map_or(0, |list| list.iter().filter(|h| !h.is_finished()).count())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_cancel_aborts_registered_task() {
        let registry = CancellationRegistry::new();
        let id = EffectId::from_static("timer");

        let task = tokio::spawn(async {
            tokio::time::sleep(Duration::from_secs(60)).await;
        });
        registry.register(&id, task.abort_handle());
        assert_eq!(registry.outstanding(&id), 1);

        assert_eq!(registry.cancel(&id), 1);
        assert!(task.await.is_err_and(|e| e.is_cancelled()));
        assert_eq!(registry.outstanding(&id), 0);
    }

    #[tokio::test]
    async fn test_cancel_unknown_id_is_noop() {
        let registry = CancellationRegistry::new();
        assert_eq!(registry.cancel(&EffectId::from_static("missing")), 0);
    }

    #[tokio::test]
    async fn test_finished_tasks_are_not_counted() {
        let registry = CancellationRegistry::new();
        let id = EffectId::from_static("quick");

        let task = tokio::spawn(async {});
        let handle = task.abort_handle();
        let _ = task.await;

        registry.register(&id, handle);
        assert_eq!(registry.outstanding(&id), 0);
        assert_eq!(registry.cancel(&id), 0);
    }
}
