use std::time::{Duration, Instant};

pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;

    fn duration_since(&self, time: Instant) -> Duration {
        return self.now().saturating_duration_since(time);
    }
}

#[derive(Clone)]
pub struct SystemClock {}

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        return Instant::now();
    }
}

impl SystemClock {
    pub fn new() -> SystemClock {
        return SystemClock {};
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        return Self::new();
    }
}
