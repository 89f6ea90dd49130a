use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use crate::clock::clock::Clock;
use crate::scheduler::scheduler::{ScheduledTask, Scheduler};

pub struct ManualScheduler {
    state: Mutex<ManualState>,
}

struct ManualState {
    now: Instant,
    next_sequence: u64,
    tasks: Vec<PendingTask>,
}

struct PendingTask {
    deadline: Instant,
    sequence: u64,
    task: ScheduledTask,
}

impl ManualScheduler {
    pub fn new() -> Self {
        return ManualScheduler {
            state: Mutex::new(ManualState { now: Instant::now(), next_sequence: 0, tasks: Vec::new() }),
        };
    }

    pub fn advance(&self, by: Duration) {
        let target = self.lock().now + by;
        loop {
            let due = {
                let mut state = self.lock();
                let next_due = state.tasks
                    .iter()
                    .enumerate()
                    .filter(|(_, pending)| pending.deadline <= target)
                    .min_by_key(|(_, pending)| (pending.deadline, pending.sequence))
                    .map(|(index, _)| index);

                match next_due {
                    Some(index) => {
                        let pending = state.tasks.swap_remove(index);
                        if pending.deadline > state.now {
                            state.now = pending.deadline;
                        }
                        Some(pending.task)
                    }
                    None => {
                        state.now = target;
                        None
                    }
                }
            };
            match due {
                Some(task) => task(),
                None => return,
            }
        }
    }

    pub fn pending_tasks(&self) -> usize {
        return self.lock().tasks.len();
    }

    fn lock(&self) -> MutexGuard<'_, ManualState> {
        return self.state.lock().unwrap_or_else(PoisonError::into_inner);
    }
}

impl Default for ManualScheduler {
    fn default() -> Self {
        return Self::new();
    }
}

impl Clock for ManualScheduler {
    fn now(&self) -> Instant {
        return self.lock().now;
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: ScheduledTask) {
        let mut state = self.lock();
        let deadline = state.now + delay;
        let sequence = state.next_sequence;
        state.next_sequence += 1;
        state.tasks.push(PendingTask { deadline, sequence, task });
    }
}
