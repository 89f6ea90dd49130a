use std::mem;
use std::time::Duration;

use tracing::debug;

use crate::correlation::async_correlator::AsyncCorrelator;
use crate::correlation::sync_correlator::{SyncCorrelator, SyncSlot};
use crate::owner::owner::Owner;
use crate::request::error::CallError;
use crate::request::property::{Batch, PropertyOp, PropertyRequest};
use crate::request::request_id::{CallerHandle, RequestId, RequestIdGenerator};

pub struct SyncWaiter {
    pub request_id: RequestId,
    pub slot: SyncSlot,
}

#[derive(Debug)]
pub struct AssembledBatch {
    pub batch: Batch,
    pub timeouts: Vec<(RequestId, Duration)>,
}

enum Registration {
    Sync(RequestId),
    Async(RequestId),
}

// Dropped before finish, the assembler removes every id it registered.
pub struct BatchAssembler<'a> {
    request_id_generator: &'a dyn RequestIdGenerator,
    pending_sync: &'a SyncCorrelator,
    pending_async: &'a AsyncCorrelator,
    expected_count: usize,
    requests: Vec<PropertyRequest>,
    registrations: Vec<Registration>,
    timeouts: Vec<(RequestId, Duration)>,
}

impl<'a> BatchAssembler<'a> {
    pub fn begin(expected_count: usize,
                 request_id_generator: &'a dyn RequestIdGenerator,
                 pending_sync: &'a SyncCorrelator,
                 pending_async: &'a AsyncCorrelator) -> Self {
        return BatchAssembler {
            request_id_generator,
            pending_sync,
            pending_async,
            expected_count,
            requests: Vec::with_capacity(expected_count),
            registrations: Vec::with_capacity(expected_count),
            timeouts: Vec::new(),
        };
    }

    pub fn add_sync(&mut self, op: PropertyOp, timeout: Duration) -> Result<SyncWaiter, CallError> {
        let request = self.next_request(op)?;
        let request_id = request.request_id;

        let slot = self.pending_sync.register(request_id);
        self.registrations.push(Registration::Sync(request_id));
        self.push(request, timeout);
        return Ok(SyncWaiter { request_id, slot });
    }

    pub fn add_async(&mut self,
                     op: PropertyOp,
                     caller_handle: CallerHandle,
                     owner: &Owner,
                     timeout: Duration) -> Result<RequestId, CallError> {
        let request = self.next_request(op)?;
        let request_id = request.request_id;

        self.pending_async.register(request_id, caller_handle, request.kind, owner.clone());
        self.registrations.push(Registration::Async(request_id));
        self.push(request, timeout);
        return Ok(request_id);
    }

    pub fn len(&self) -> usize {
        return self.requests.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.requests.is_empty();
    }

    pub fn finish(mut self) -> AssembledBatch {
        self.registrations.clear();
        let requests = mem::take(&mut self.requests);
        let timeouts = mem::take(&mut self.timeouts);
        debug!(size = requests.len(), "assembled batch");
        return AssembledBatch { batch: Batch { requests }, timeouts };
    }

    fn next_request(&self, op: PropertyOp) -> Result<PropertyRequest, CallError> {
        if self.requests.len() >= self.expected_count {
            return Err(CallError::InvalidRequest {
                reason: format!("batch already holds the expected {} operations", self.expected_count),
            });
        }
        return op.into_request(self.request_id_generator.next());
    }

    fn push(&mut self, request: PropertyRequest, timeout: Duration) {
        if !timeout.is_zero() {
            self.timeouts.push((request.request_id, timeout));
        }
        self.requests.push(request);
    }

    fn roll_back(&mut self) {
        let registrations = mem::take(&mut self.registrations);
        if registrations.is_empty() {
            return;
        }
        debug!(registered = registrations.len(), "rolling back an unfinished batch");
        for registration in &registrations {
            if let Registration::Sync(request_id) = registration {
                self.pending_sync.remove(*request_id);
            }
        }
        for registration in &registrations {
            if let Registration::Async(request_id) = registration {
                self.pending_async.complete_if_present(*request_id);
            }
        }
    }
}

impl<'a> Drop for BatchAssembler<'a> {
    fn drop(&mut self) {
        self.roll_back();
    }
}
