pub mod pipeline;
pub mod server;
pub mod tracing;
