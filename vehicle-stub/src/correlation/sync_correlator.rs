use std::sync::Arc;

use dashmap::DashMap;

use crate::correlation::completion_slot::CompletionSlot;
use crate::request::error::CallError;
use crate::request::property::PropertyResult;
use crate::request::request_id::RequestId;

pub type SyncOutcome = Result<PropertyResult, CallError>;

pub type SyncSlot = Arc<CompletionSlot<SyncOutcome>>;

pub struct SyncCorrelator {
    pending_requests: DashMap<RequestId, SyncSlot>,
}

impl SyncCorrelator {
    pub fn new() -> Self {
        return Self::new_with_capacity(0);
    }

    pub fn new_with_capacity(capacity: usize) -> Self {
        return SyncCorrelator { pending_requests: DashMap::with_capacity(capacity) };
    }

    pub fn register(&self, request_id: RequestId) -> SyncSlot {
        let slot = Arc::new(CompletionSlot::new());
        self.pending_requests.insert(request_id, slot.clone());
        return slot;
    }

    pub fn complete_if_present(&self, request_id: RequestId, outcome: SyncOutcome) -> bool {
        return match self.pending_requests.remove(&request_id) {
            Some((_, slot)) => {
                slot.complete(outcome);
                true
            }
            None => false,
        };
    }

    pub fn remove(&self, request_id: RequestId) -> Option<SyncSlot> {
        return self.pending_requests.remove(&request_id).map(|(_, slot)| slot);
    }

    pub fn contains(&self, request_id: RequestId) -> bool {
        return self.pending_requests.contains_key(&request_id);
    }

    pub fn size(&self) -> usize {
        return self.pending_requests.len();
    }

    pub(crate) fn drain(&self) -> Vec<(RequestId, SyncSlot)> {
        let request_ids: Vec<RequestId> = self.pending_requests.iter().map(|entry| *entry.key()).collect();
        return request_ids
            .into_iter()
            .filter_map(|request_id| self.pending_requests.remove(&request_id))
            .collect();
    }
}

impl Default for SyncCorrelator {
    fn default() -> Self {
        return Self::new();
    }
}
