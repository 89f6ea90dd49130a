use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::request::request_id::RequestId;

pub(crate) struct TimeoutGroup {
    pending: VecDeque<(RequestId, Instant)>,
}

impl TimeoutGroup {
    pub(crate) fn new() -> Self {
        return TimeoutGroup { pending: VecDeque::new() };
    }

    pub(crate) fn push(&mut self, request_id: RequestId, deadline: Instant) {
        self.pending.push_back((request_id, deadline));
    }

    pub(crate) fn take_due(&mut self, cutoff: Instant) -> Vec<RequestId> {
        let mut due = Vec::new();
        while let Some((request_id, deadline)) = self.pending.front() {
            if *deadline > cutoff {
                break;
            }
            due.push(*request_id);
            self.pending.pop_front();
        }
        return due;
    }

    pub(crate) fn delay_until_next(&self, now: Instant) -> Option<Duration> {
        return self.pending.front().map(|(_, deadline)| deadline.saturating_duration_since(now));
    }

    pub(crate) fn len(&self) -> usize {
        return self.pending.len();
    }

    pub(crate) fn is_empty(&self) -> bool {
        return self.pending.is_empty();
    }
}
