use std::sync::{Arc, Weak};
use std::time::Duration;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;

use crate::clock::clock::Clock;
use crate::request::request_id::RequestId;
use crate::scheduler::scheduler::Scheduler;
use crate::timeout::timeout_group::TimeoutGroup;

pub trait ExpiredRequestsHandler: Send + Sync {
    fn on_requests_expired(&self, request_ids: Vec<RequestId>);
}

pub struct TimeoutRegistry {
    groups: DashMap<Duration, TimeoutGroup>,
    clock: Arc<dyn Clock>,
    scheduler: Arc<dyn Scheduler>,
    expired_requests_handler: Arc<dyn ExpiredRequestsHandler>,
    resolution: Duration,
}

impl TimeoutRegistry {
    pub fn new(clock: Arc<dyn Clock>,
               scheduler: Arc<dyn Scheduler>,
               expired_requests_handler: Arc<dyn ExpiredRequestsHandler>,
               resolution: Duration) -> Arc<Self> {
        return Arc::new(TimeoutRegistry {
            groups: DashMap::new(),
            clock,
            scheduler,
            expired_requests_handler,
            resolution,
        });
    }

    pub fn arm(self: &Arc<Self>, request_id: RequestId, timeout: Duration) {
        if timeout.is_zero() {
            return;
        }
        let deadline = match self.clock.now().checked_add(timeout) {
            Some(deadline) => deadline,
            None => {
                debug!(request_id, "timeout is beyond any representable deadline, request never expires");
                return;
            }
        };
        let is_new_group = match self.groups.entry(timeout) {
            Entry::Occupied(mut group) => {
                group.get_mut().push(request_id, deadline);
                false
            }
            Entry::Vacant(vacant) => {
                let mut group = TimeoutGroup::new();
                group.push(request_id, deadline);
                vacant.insert(group);
                true
            }
        };
        if is_new_group {
            self.schedule_expiry(timeout, timeout);
        }
    }

    pub fn arm_all(self: &Arc<Self>, timeouts: Vec<(RequestId, Duration)>) {
        for (request_id, timeout) in timeouts {
            self.arm(request_id, timeout);
        }
    }

    pub fn group_count(&self) -> usize {
        return self.groups.len();
    }

    pub fn armed_count(&self) -> usize {
        return self.groups.iter().map(|group| group.value().len()).sum();
    }

    pub(crate) fn clear(&self) {
        self.groups.clear();
    }

    fn schedule_expiry(self: &Arc<Self>, timeout: Duration, delay: Duration) {
        let registry: Weak<TimeoutRegistry> = Arc::downgrade(self);
        self.scheduler.schedule(delay, Box::new(move || {
            if let Some(registry) = registry.upgrade() {
                registry.expire(timeout);
            }
        }));
    }

    fn expire(self: &Arc<Self>, timeout: Duration) {
        let now = self.clock.now();
        let cutoff = now.checked_add(self.resolution).unwrap_or(now);
        let (expired, next_delay) = match self.groups.entry(timeout) {
            Entry::Occupied(mut group) => {
                let expired = group.get_mut().take_due(cutoff);
                let next_delay = group.get().delay_until_next(now);
                if next_delay.is_none() {
                    group.remove();
                }
                (expired, next_delay)
            }
            Entry::Vacant(_) => return,
        };

        if let Some(delay) = next_delay {
            self.schedule_expiry(timeout, delay);
        }
        if !expired.is_empty() {
            debug!(timeout_ms = timeout.as_millis() as u64, expired = expired.len(), "requests timed out");
            self.expired_requests_handler.on_requests_expired(expired);
        }
    }
}
