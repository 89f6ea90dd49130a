pub mod timeout_group;
pub mod timeout_registry;
