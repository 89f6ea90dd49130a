pub mod scheduler;
pub mod delayed_task_queue;
pub mod manual_scheduler;
