pub mod errors;
pub mod pass_handle;
pub mod ports;
pub mod render_dispatcher;
