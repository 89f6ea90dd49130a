use std::time::Duration;

use tokio::runtime::{Builder, Runtime};

use crate::scheduler::scheduler::{ScheduledTask, Scheduler};

pub struct DelayedTaskQueue {
    single_thread_pool: Option<Runtime>,
}

impl DelayedTaskQueue {
    pub fn new() -> std::io::Result<DelayedTaskQueue> {
        let single_thread_pool = Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("vehicle-stub-timeouts")
            .enable_all()
            .build()?;

        return Ok(DelayedTaskQueue { single_thread_pool: Some(single_thread_pool) });
    }

    pub fn shutdown(mut self) {
        self.shutdown_pool();
    }

    fn shutdown_pool(&mut self) {
        if let Some(single_thread_pool) = self.single_thread_pool.take() {
            single_thread_pool.shutdown_background();
        }
    }
}

impl Scheduler for DelayedTaskQueue {
    fn schedule(&self, delay: Duration, task: ScheduledTask) {
        if let Some(single_thread_pool) = &self.single_thread_pool {
            single_thread_pool.spawn(async move {
                tokio::time::sleep(delay).await;
                task();
            });
        }
    }
}

impl Drop for DelayedTaskQueue {
    fn drop(&mut self) {
        self.shutdown_pool();
    }
}
