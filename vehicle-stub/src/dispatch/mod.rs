pub mod result_dispatcher;
