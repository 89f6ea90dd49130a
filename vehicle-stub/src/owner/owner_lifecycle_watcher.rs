use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tracing::{debug, info, warn};

use crate::correlation::async_correlator::AsyncCorrelator;
use crate::owner::owner_liveness::{OwnerId, OwnerLiveness};
use crate::request::error::CallError;

// The watched set doubles as the registration lock: a death notification racing with a
// registration waits for the whole batch and then purges all of it.
pub struct OwnerLifecycleWatcher {
    liveness: Arc<dyn OwnerLiveness>,
    pending_async: Arc<AsyncCorrelator>,
    watched_owners: Mutex<HashSet<OwnerId>>,
}

impl OwnerLifecycleWatcher {
    pub fn new(liveness: Arc<dyn OwnerLiveness>, pending_async: Arc<AsyncCorrelator>) -> Arc<Self> {
        return Arc::new(OwnerLifecycleWatcher {
            liveness,
            pending_async,
            watched_owners: Mutex::new(HashSet::new()),
        });
    }

    pub fn register_for<T, F>(self: &Arc<Self>, owner_id: OwnerId, register: F) -> Result<T, CallError>
        where F: FnOnce() -> Result<T, CallError> {
        let mut watched_owners = self.lock();
        if !watched_owners.contains(&owner_id) {
            let watcher: Weak<OwnerLifecycleWatcher> = Arc::downgrade(self);
            let subscription = self.liveness.subscribe(owner_id, Box::new(move || {
                if let Some(watcher) = watcher.upgrade() {
                    watcher.on_owner_dead(owner_id);
                }
            }));
            if let Err(err) = subscription {
                warn!(owner_id, error = %err, "failed to watch owner, it may already be dead");
                return Err(CallError::OwnerUnreachable { owner_id });
            }
            debug!(owner_id, "watching owner");
            watched_owners.insert(owner_id);
        }
        return register();
    }

    pub fn on_owner_dead(&self, owner_id: OwnerId) {
        let purged = {
            let mut watched_owners = self.lock();
            let purged = self.pending_async.purge_for_owner(owner_id);
            watched_owners.remove(&owner_id);
            purged
        };
        self.liveness.unsubscribe(owner_id);
        info!(owner_id, purged, "owner died, purged its pending requests");
    }

    pub fn is_watching(&self, owner_id: OwnerId) -> bool {
        return self.lock().contains(&owner_id);
    }

    pub fn watched_owner_count(&self) -> usize {
        return self.lock().len();
    }

    pub(crate) fn unwatch_all(&self) {
        let owner_ids: Vec<OwnerId> = self.lock().drain().collect();
        for owner_id in owner_ids {
            self.liveness.unsubscribe(owner_id);
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<OwnerId>> {
        return self.watched_owners.lock().unwrap_or_else(PoisonError::into_inner);
    }
}
