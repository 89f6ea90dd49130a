pub mod completion_slot;
pub mod sync_correlator;
pub mod async_correlator;
