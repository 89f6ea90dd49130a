use std::collections::HashSet;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tracing::{debug, info};

use crate::batch::batch_assembler::{AssembledBatch, BatchAssembler, SyncWaiter};
use crate::clock::clock::{Clock, SystemClock};
use crate::correlation::async_correlator::AsyncCorrelator;
use crate::correlation::sync_correlator::SyncCorrelator;
use crate::dispatch::result_dispatcher::ResultDispatcher;
use crate::owner::owner::{AsyncRequest, Owner};
use crate::owner::owner_lifecycle_watcher::OwnerLifecycleWatcher;
use crate::owner::owner_liveness::OwnerLiveness;
use crate::request::error::{CallError, TransportError};
use crate::request::property::{PropValue, PropertyOp, PropertyResult};
use crate::request::request_id::CallerHandle;
use crate::request::request_id_allocator::RequestIdAllocator;
use crate::scheduler::delayed_task_queue::DelayedTaskQueue;
use crate::scheduler::scheduler::Scheduler;
use crate::stub::vehicle_stub_config::VehicleStubConfig;
use crate::timeout::timeout_registry::TimeoutRegistry;
use crate::transport::transport::{ResultSinkType, Transport};

pub struct VehicleStub {
    config: VehicleStubConfig,
    transport: Arc<dyn Transport>,
    request_id_allocator: RequestIdAllocator,
    next_caller_handle: AtomicU64,
    pending_sync: Arc<SyncCorrelator>,
    pending_async: Arc<AsyncCorrelator>,
    dispatcher: Arc<ResultDispatcher>,
    timeouts: Arc<TimeoutRegistry>,
    watcher: Arc<OwnerLifecycleWatcher>,
    is_shut_down: RwLock<bool>,
}

impl VehicleStub {
    pub fn new(transport: Arc<dyn Transport>,
               liveness: Arc<dyn OwnerLiveness>,
               clock: Arc<dyn Clock>,
               scheduler: Arc<dyn Scheduler>,
               config: VehicleStubConfig) -> Self {
        let pending_sync = Arc::new(SyncCorrelator::new_with_capacity(config.get_initial_capacity()));
        let pending_async = Arc::new(AsyncCorrelator::new_with_capacity(config.get_initial_capacity()));
        let dispatcher = Arc::new(ResultDispatcher::new(pending_sync.clone(), pending_async.clone()));
        let timeouts = TimeoutRegistry::new(
            clock,
            scheduler,
            dispatcher.clone(),
            config.get_timeout_resolution(),
        );
        let watcher = OwnerLifecycleWatcher::new(liveness, pending_async.clone());

        return VehicleStub {
            config,
            transport,
            request_id_allocator: RequestIdAllocator::new(),
            next_caller_handle: AtomicU64::new(1),
            pending_sync,
            pending_async,
            dispatcher,
            timeouts,
            watcher,
            is_shut_down: RwLock::new(false),
        };
    }

    pub fn start(transport: Arc<dyn Transport>,
                 liveness: Arc<dyn OwnerLiveness>,
                 config: VehicleStubConfig) -> std::io::Result<Self> {
        let scheduler = Arc::new(DelayedTaskQueue::new()?);
        return Ok(Self::new(transport, liveness, Arc::new(SystemClock::new()), scheduler, config));
    }

    pub fn get(&self, value: PropValue) -> Result<Option<PropValue>, CallError> {
        return self.sync_call(PropertyOp::Get(value), self.config.get_sync_op_timeout());
    }

    pub fn set(&self, value: PropValue) -> Result<(), CallError> {
        return self.sync_call(PropertyOp::Set(value), self.config.get_sync_op_timeout()).map(|_| ());
    }

    pub fn sync_call(&self, op: PropertyOp, timeout: Duration) -> Result<Option<PropValue>, CallError> {
        let waiter = self.submit_sync(op, timeout)?;
        let request_id = waiter.request_id;

        let outcome = match waiter.slot.wait_timeout(timeout) {
            Some(outcome) => outcome,
            None => match self.pending_sync.remove(request_id) {
                Some(_) => Err(CallError::TimedOut { request_id }),
                None => waiter.slot
                    .wait_timeout(self.config.get_timeout_resolution())
                    .unwrap_or(Err(CallError::TimedOut { request_id })),
            },
        };
        return outcome.and_then(PropertyResult::into_sync_outcome);
    }

    pub async fn call(&self, op: PropertyOp, timeout: Duration) -> Result<Option<PropValue>, CallError> {
        let waiter = self.submit_sync(op, timeout)?;
        let request_id = waiter.request_id;

        let outcome = match tokio::time::timeout(timeout, &*waiter.slot).await {
            Ok(outcome) => outcome,
            Err(_) => match self.pending_sync.remove(request_id) {
                Some(_) => Err(CallError::TimedOut { request_id }),
                None => tokio::time::timeout(self.config.get_timeout_resolution(), &*waiter.slot)
                    .await
                    .unwrap_or(Err(CallError::TimedOut { request_id })),
            },
        };
        return outcome.and_then(PropertyResult::into_sync_outcome);
    }

    pub fn async_call(&self,
                      ops: Vec<PropertyOp>,
                      owner: &Owner,
                      per_op_timeout: Duration) -> Result<Vec<CallerHandle>, CallError> {
        let requests: Vec<AsyncRequest> = ops
            .into_iter()
            .map(|op| AsyncRequest::new(self.next_caller_handle.fetch_add(1, Ordering::Relaxed), op, per_op_timeout))
            .collect();
        let caller_handles = requests.iter().map(|request| request.caller_handle).collect();

        self.async_call_with(requests, owner)?;
        return Ok(caller_handles);
    }

    /// Nothing is registered when an error is returned. A batch the transport refuses is still
    /// `Ok`: every request in it has already been reported to `owner` as rejected.
    pub fn async_call_with(&self, requests: Vec<AsyncRequest>, owner: &Owner) -> Result<(), CallError> {
        let running = self.running()?;
        if requests.is_empty() {
            return Ok(());
        }

        let assembled = self.watcher.register_for(owner.id(), || {
            let mut assembler = self.assembler(requests.len());
            for request in requests {
                let request_id = assembler.add_async(request.op, request.caller_handle, owner, request.timeout)?;
                debug!(request_id, caller_handle = request.caller_handle, owner_id = owner.id(), "registered async call");
            }
            return Ok(assembler.finish());
        })?;
        drop(running);

        if let Err(err) = self.submit(assembled) {
            debug!(owner_id = owner.id(), error = %err, "async batch rejected");
        }
        return Ok(());
    }

    pub fn cancel(&self, caller_handles: &[CallerHandle]) -> usize {
        let caller_handles: HashSet<CallerHandle> = caller_handles.iter().copied().collect();
        return self.pending_async.cancel(&caller_handles);
    }

    pub fn count_pending_requests(&self) -> usize {
        return self.pending_sync.size() + self.pending_async.size();
    }

    pub fn result_sink(&self) -> ResultSinkType {
        return self.dispatcher.clone();
    }

    pub fn shutdown(&self) {
        {
            let mut is_shut_down = self.is_shut_down.write().unwrap_or_else(PoisonError::into_inner);
            if *is_shut_down {
                return;
            }
            *is_shut_down = true;
        }
        self.watcher.unwatch_all();
        self.timeouts.clear();
        let cancelled = self.dispatcher.cancel_all();
        info!(cancelled, "vehicle stub shut down");
    }

    fn submit_sync(&self, op: PropertyOp, timeout: Duration) -> Result<SyncWaiter, CallError> {
        if timeout.is_zero() {
            return Err(CallError::InvalidRequest { reason: "a blocking call needs a non-zero timeout".to_string() });
        }

        let running = self.running()?;
        let (waiter, assembled) = {
            let mut assembler = self.assembler(1);
            let waiter = assembler.add_sync(op, timeout)?;
            (waiter, assembler.finish())
        };
        drop(running);
        debug!(request_id = waiter.request_id, timeout_ms = timeout.as_millis() as u64, "registered blocking call");

        self.submit(assembled).map_err(|err| CallError::from(&err))?;
        return Ok(waiter);
    }

    fn submit(&self, assembled: AssembledBatch) -> Result<(), TransportError> {
        let AssembledBatch { batch, timeouts } = assembled;
        let request_ids = batch.request_ids();
        debug!(size = request_ids.len(), "submitting batch");

        return match self.transport.submit(batch, self.result_sink()) {
            Ok(()) => {
                self.timeouts.arm_all(timeouts);
                Ok(())
            }
            Err(err) => {
                self.dispatcher.reject(&request_ids, &err);
                Err(err)
            }
        };
    }

    fn assembler(&self, expected_count: usize) -> BatchAssembler<'_> {
        return BatchAssembler::begin(
            expected_count,
            &self.request_id_allocator,
            &self.pending_sync,
            &self.pending_async,
        );
    }

    // Registrations hold the read side until they land in a table, so shutdown drains them all.
    fn running(&self) -> Result<RwLockReadGuard<'_, bool>, CallError> {
        let is_shut_down = self.is_shut_down.read().unwrap_or_else(PoisonError::into_inner);
        if *is_shut_down {
            return Err(CallError::InvalidRequest { reason: "vehicle stub is shut down".to_string() });
        }
        return Ok(is_shut_down);
    }
}

impl Drop for VehicleStub {
    fn drop(&mut self) {
        self.shutdown();
    }
}
