pub mod vehicle_stub;
pub mod vehicle_stub_config;
