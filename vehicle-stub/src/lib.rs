//! Request/response correlation for a vehicle property stub.
//!
//! The hardware channel only understands batched, asynchronous exchanges over a single
//! callback. [`stub::vehicle_stub::VehicleStub`] turns that into blocking get/set calls,
//! callback-driven async calls and explicit cancellation, matching every incoming result
//! back to exactly one waiter.
//!
//! Lock order, whenever more than one table is touched by a single operation:
//! the stub's lifecycle lock (read side, held by every registration), then the owner registration
//! lock, then the sync table, then the async table, then the timeout groups.

pub mod batch;
pub mod clock;
pub mod correlation;
pub mod dispatch;
pub mod owner;
pub mod request;
pub mod scheduler;
pub mod stub;
pub mod timeout;
pub mod transport;
