//! In-process, per-project mutual exclusion for descriptor read-modify-write cycles.
//!
//! Only protects writers inside this process. Another process editing the same projects root
//! can still interleave with us.
//!
//! An entry lives only while some caller holds or waits for it, so the map stays bounded by the
//! number of in-flight requests rather than by the ids clients have ever sent.

use autofixer_ids::ProjectId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Debug, Default)]
pub struct ProjectLocks {
    inner: Mutex<HashMap<ProjectId, Arc<Mutex<()>>>>,
}

impl ProjectLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `f` while holding the lock for `project_id`.
    ///
    /// The guarded value is `()`, so a poisoned lock carries no broken state and is recovered.
    pub fn with_lock<T>(&self, project_id: &ProjectId, f: impl FnOnce() -> T) -> T {
        let lock = self.lock_for(project_id);
        let value = {
            let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
            f()
        };
        self.release(project_id, lock);
        value
    }

    fn lock_for(&self, project_id: &ProjectId) -> Arc<Mutex<()>> {
        let mut map = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        map.entry(project_id.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Drops the map entry once no other caller holds a handle to it.
    fn release(&self, project_id: &ProjectId, lock: Arc<Mutex<()>>) {
        let mut map = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        // Handles are only cloned under the map lock, so the count cannot rise while we check.
        if Arc::strong_count(&lock) == 2 {
            map.remove(project_id);
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }
}
