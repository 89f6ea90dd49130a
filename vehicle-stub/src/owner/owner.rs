use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use std::time::Duration;

use crate::owner::owner_liveness::OwnerId;
use crate::request::error::CallError;
use crate::request::property::{OperationKind, PropValue, PropertyOp};
use crate::request::request_id::CallerHandle;

pub type AsyncOutcome = Result<Option<PropValue>, CallError>;

#[derive(Debug, Clone, PartialEq)]
pub struct AsyncResult {
    pub caller_handle: CallerHandle,
    pub kind: OperationKind,
    pub outcome: AsyncOutcome,
}

impl AsyncResult {
    pub fn new(caller_handle: CallerHandle, kind: OperationKind, outcome: AsyncOutcome) -> Self {
        return AsyncResult { caller_handle, kind, outcome };
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AsyncRequest {
    pub caller_handle: CallerHandle,
    pub op: PropertyOp,
    pub timeout: Duration,
}

impl AsyncRequest {
    pub fn new(caller_handle: CallerHandle, op: PropertyOp, timeout: Duration) -> Self {
        return AsyncRequest { caller_handle, op, timeout };
    }
}

pub trait AsyncResultCallback: Send + Sync {
    fn on_results(&self, results: Vec<AsyncResult>);
}

pub type AsyncResultCallbackType = Arc<dyn AsyncResultCallback + 'static>;

#[derive(Clone)]
pub struct Owner {
    id: OwnerId,
    callback: AsyncResultCallbackType,
}

impl Owner {
    pub fn new(id: OwnerId, callback: AsyncResultCallbackType) -> Self {
        return Owner { id, callback };
    }

    pub fn id(&self) -> OwnerId {
        return self.id;
    }

    pub(crate) fn deliver(&self, results: Vec<AsyncResult>) {
        if results.is_empty() {
            return;
        }
        self.callback.on_results(results);
    }
}

impl Debug for Owner {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "Owner({})", self.id)
    }
}

pub(crate) struct OwnerResults {
    results_by_owner: Vec<(Owner, Vec<AsyncResult>)>,
}

impl OwnerResults {
    pub(crate) fn new() -> Self {
        return OwnerResults { results_by_owner: Vec::new() };
    }

    pub(crate) fn add(&mut self, owner: Owner, result: AsyncResult) {
        match self.results_by_owner.iter_mut().find(|(existing, _)| existing.id() == owner.id()) {
            Some((_, results)) => results.push(result),
            None => self.results_by_owner.push((owner, vec![result])),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        return self.results_by_owner.is_empty();
    }

    pub(crate) fn deliver(self) {
        for (owner, results) in self.results_by_owner {
            owner.deliver(results);
        }
    }
}
