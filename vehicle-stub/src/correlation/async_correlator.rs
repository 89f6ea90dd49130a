use std::collections::HashSet;

use dashmap::DashMap;
use tracing::warn;

use crate::owner::owner::Owner;
use crate::owner::owner_liveness::OwnerId;
use crate::request::property::OperationKind;
use crate::request::request_id::{CallerHandle, RequestId};

#[derive(Debug, Clone)]
pub struct PendingAsyncEntry {
    pub caller_handle: CallerHandle,
    pub kind: OperationKind,
    pub owner: Owner,
}

/// Every mutation takes the lock of the shard holding the id, so a result, a timeout, a
/// cancellation and an owner purge racing for the same id resolve to exactly one winner; the
/// others observe the entry as absent.
pub struct AsyncCorrelator {
    pending_requests: DashMap<RequestId, PendingAsyncEntry>,
}

impl AsyncCorrelator {
    pub fn new() -> Self {
        return Self::new_with_capacity(0);
    }

    pub fn new_with_capacity(capacity: usize) -> Self {
        return AsyncCorrelator { pending_requests: DashMap::with_capacity(capacity) };
    }

    pub fn register(&self, request_id: RequestId, caller_handle: CallerHandle, kind: OperationKind, owner: Owner) {
        self.pending_requests.insert(request_id, PendingAsyncEntry { caller_handle, kind, owner });
    }

    pub fn complete_if_present(&self, request_id: RequestId) -> Option<PendingAsyncEntry> {
        return self.pending_requests.remove(&request_id).map(|(_, entry)| entry);
    }

    pub fn cancel(&self, caller_handles: &HashSet<CallerHandle>) -> usize {
        let mut cancelled = 0;
        self.pending_requests.retain(|request_id, entry| {
            if caller_handles.contains(&entry.caller_handle) {
                warn!(request_id = *request_id, caller_handle = entry.caller_handle, "request cancelled");
                cancelled += 1;
                return false;
            }
            return true;
        });
        return cancelled;
    }

    pub fn purge_for_owner(&self, owner_id: OwnerId) -> usize {
        let mut purged = 0;
        self.pending_requests.retain(|_, entry| {
            if entry.owner.id() == owner_id {
                purged += 1;
                return false;
            }
            return true;
        });
        return purged;
    }

    pub fn contains(&self, request_id: RequestId) -> bool {
        return self.pending_requests.contains_key(&request_id);
    }

    pub fn size(&self) -> usize {
        return self.pending_requests.len();
    }

    pub(crate) fn drain(&self) -> Vec<(RequestId, PendingAsyncEntry)> {
        let request_ids: Vec<RequestId> = self.pending_requests.iter().map(|entry| *entry.key()).collect();
        return request_ids
            .into_iter()
            .filter_map(|request_id| self.pending_requests.remove(&request_id))
            .collect();
    }
}

impl Default for AsyncCorrelator {
    fn default() -> Self {
        return Self::new();
    }
}
