pub mod async_correlator;
pub mod request_id_allocator;
