pub mod request_id;
pub mod request_id_allocator;
pub mod property;
pub mod error;
