use std::sync::Arc;

use tracing::{debug, warn};

use crate::correlation::async_correlator::AsyncCorrelator;
use crate::correlation::sync_correlator::SyncCorrelator;
use crate::owner::owner::{AsyncResult, OwnerResults};
use crate::request::error::{CallError, TransportError};
use crate::request::property::PropertyResult;
use crate::request::request_id::RequestId;
use crate::timeout::timeout_registry::ExpiredRequestsHandler;
use crate::transport::transport::ResultSink;

pub struct ResultDispatcher {
    pending_sync: Arc<SyncCorrelator>,
    pending_async: Arc<AsyncCorrelator>,
}

impl ResultDispatcher {
    pub fn new(pending_sync: Arc<SyncCorrelator>, pending_async: Arc<AsyncCorrelator>) -> Self {
        return ResultDispatcher { pending_sync, pending_async };
    }

    pub fn dispatch(&self, results: Vec<PropertyResult>) {
        let mut owner_results = OwnerResults::new();
        for result in results {
            let request_id = result.request_id;
            if let Some(slot) = self.pending_sync.remove(request_id) {
                slot.complete(Ok(result));
                continue;
            }
            match self.pending_async.complete_if_present(request_id) {
                Some(entry) => {
                    let outcome = result.into_async_outcome(entry.kind);
                    owner_results.add(entry.owner, AsyncResult::new(entry.caller_handle, entry.kind, outcome));
                }
                None => {
                    let err = CallError::UnknownRequest { request_id };
                    warn!(request_id, error = %err, "dropping result");
                }
            }
        }
        owner_results.deliver();
    }

    pub fn reject(&self, request_ids: &[RequestId], err: &TransportError) {
        warn!(requests = request_ids.len(), error = %err, "transport rejected batch");
        let rejection = CallError::from(err);
        self.resolve_with(request_ids, |_| rejection.clone());
    }

    pub fn cancel_all(&self) -> usize {
        let mut cancelled = 0;
        for (request_id, slot) in self.pending_sync.drain() {
            slot.complete(Err(CallError::Cancelled { request_id }));
            cancelled += 1;
        }

        let mut owner_results = OwnerResults::new();
        for (request_id, entry) in self.pending_async.drain() {
            let outcome = Err(CallError::Cancelled { request_id });
            owner_results.add(entry.owner, AsyncResult::new(entry.caller_handle, entry.kind, outcome));
            cancelled += 1;
        }
        owner_results.deliver();
        return cancelled;
    }

    fn resolve_with<F>(&self, request_ids: &[RequestId], error_for: F)
        where F: Fn(RequestId) -> CallError {
        let mut owner_results = OwnerResults::new();
        for request_id in request_ids.iter().copied() {
            if self.pending_sync.complete_if_present(request_id, Err(error_for(request_id))) {
                continue;
            }
            if let Some(entry) = self.pending_async.complete_if_present(request_id) {
                let outcome = Err(error_for(request_id));
                owner_results.add(entry.owner, AsyncResult::new(entry.caller_handle, entry.kind, outcome));
            }
        }
        owner_results.deliver();
    }
}

impl ResultSink for ResultDispatcher {
    fn on_results(&self, results: Vec<PropertyResult>) {
        debug!(results = results.len(), "received results");
        self.dispatch(results);
    }
}

impl ExpiredRequestsHandler for ResultDispatcher {
    fn on_requests_expired(&self, request_ids: Vec<RequestId>) {
        self.resolve_with(&request_ids, |request_id| CallError::TimedOut { request_id });
    }
}
