pub mod owner;
pub mod owner_liveness;
pub mod owner_lifecycle_watcher;
