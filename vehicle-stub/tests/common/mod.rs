#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use vehicle_stub::owner::owner::{AsyncResult, AsyncResultCallback};
use vehicle_stub::owner::owner_liveness::{LivenessError, OnOwnerDead, OwnerId, OwnerLiveness};
use vehicle_stub::request::error::TransportError;
use vehicle_stub::request::property::{Batch, PropValue, PropertyResult};
use vehicle_stub::transport::transport::{ResultSinkType, Transport};

pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn int_value(prop_id: i32, value: i32) -> PropValue {
    return PropValue::with_int32_values(prop_id, 0, vec![value]);
}

/// Accepts every batch and keeps it, along with the sink its results go to.
pub struct RecordingTransport {
    submissions: Mutex<Vec<(Batch, ResultSinkType)>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        return RecordingTransport { submissions: Mutex::new(Vec::new()) };
    }

    pub fn batches(&self) -> Vec<Batch> {
        return self.submissions.lock().unwrap().iter().map(|(batch, _)| batch.clone()).collect();
    }

    pub fn wait_for_batches(&self, count: usize) -> Vec<Batch> {
        loop {
            let batches = self.batches();
            if batches.len() >= count {
                return batches;
            }
            thread::sleep(Duration::from_millis(1));
        }
    }

    pub fn respond(&self, results: Vec<PropertyResult>) {
        let sink = match self.submissions.lock().unwrap().first() {
            Some((_, sink)) => sink.clone(),
            None => return,
        };
        sink.on_results(results);
    }

    /// Answers every request of `batch` with its own value echoed back.
    pub fn echo(batch: &Batch) -> Vec<PropertyResult> {
        return batch.requests
            .iter()
            .map(|request| PropertyResult::ok(request.request_id, Some(request.value.clone())))
            .collect();
    }
}

impl Transport for RecordingTransport {
    fn submit(&self, batch: Batch, result_sink: ResultSinkType) -> Result<(), TransportError> {
        self.submissions.lock().unwrap().push((batch, result_sink));
        return Ok(());
    }
}

pub struct FailingTransport {
    pub error: TransportError,
    pub attempts: Mutex<Vec<Batch>>,
}

impl FailingTransport {
    pub fn new(error: TransportError) -> Self {
        return FailingTransport { error, attempts: Mutex::new(Vec::new()) };
    }
}

impl Transport for FailingTransport {
    fn submit(&self, batch: Batch, _: ResultSinkType) -> Result<(), TransportError> {
        self.attempts.lock().unwrap().push(batch);
        return Err(self.error.clone());
    }
}

/// Owner liveness under test control: [`FakeLiveness::kill`] plays the death notification.
pub struct FakeLiveness {
    subscriptions: Mutex<HashMap<OwnerId, OnOwnerDead>>,
    dead_owners: Mutex<HashSet<OwnerId>>,
    pub unsubscribed: Mutex<Vec<OwnerId>>,
}

impl FakeLiveness {
    pub fn new() -> Self {
        return FakeLiveness {
            subscriptions: Mutex::new(HashMap::new()),
            dead_owners: Mutex::new(HashSet::new()),
            unsubscribed: Mutex::new(Vec::new()),
        };
    }

    pub fn kill(&self, owner_id: OwnerId) {
        self.dead_owners.lock().unwrap().insert(owner_id);
        let on_dead = self.subscriptions.lock().unwrap().remove(&owner_id);
        if let Some(on_dead) = on_dead {
            on_dead();
        }
    }

    pub fn is_subscribed(&self, owner_id: OwnerId) -> bool {
        return self.subscriptions.lock().unwrap().contains_key(&owner_id);
    }
}

impl OwnerLiveness for FakeLiveness {
    fn subscribe(&self, owner_id: OwnerId, on_dead: OnOwnerDead) -> Result<(), LivenessError> {
        if self.dead_owners.lock().unwrap().contains(&owner_id) {
            return Err(LivenessError::AlreadyDead(owner_id));
        }
        self.subscriptions.lock().unwrap().insert(owner_id, on_dead);
        return Ok(());
    }

    fn unsubscribe(&self, owner_id: OwnerId) {
        self.subscriptions.lock().unwrap().remove(&owner_id);
        self.unsubscribed.lock().unwrap().push(owner_id);
    }
}

pub struct RecordingCallback {
    calls: Mutex<Vec<Vec<AsyncResult>>>,
}

impl RecordingCallback {
    pub fn new() -> Self {
        return RecordingCallback { calls: Mutex::new(Vec::new()) };
    }

    pub fn calls(&self) -> Vec<Vec<AsyncResult>> {
        return self.calls.lock().unwrap().clone();
    }

    pub fn results(&self) -> Vec<AsyncResult> {
        return self.calls().into_iter().flatten().collect();
    }
}

impl AsyncResultCallback for RecordingCallback {
    fn on_results(&self, results: Vec<AsyncResult>) {
        self.calls.lock().unwrap().push(results);
    }
}
