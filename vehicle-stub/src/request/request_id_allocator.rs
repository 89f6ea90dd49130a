use std::sync::atomic::{AtomicU64, Ordering};

use crate::request::request_id::{RequestId, RequestIdGenerator};

#[derive(Debug)]
pub struct RequestIdAllocator {
    next_id: AtomicU64,
}

impl RequestIdGenerator for RequestIdAllocator {
    fn next(&self) -> RequestId {
        return self.next_id.fetch_add(1, Ordering::Relaxed);
    }
}

impl RequestIdAllocator {
    pub fn new() -> Self {
        return Self::starting_at(0);
    }

    pub fn starting_at(first: RequestId) -> Self {
        return RequestIdAllocator { next_id: AtomicU64::new(first) };
    }
}

impl Default for RequestIdAllocator {
    fn default() -> Self {
        return Self::new();
    }
}
