pub mod config;
pub mod festivales;
pub mod tracing;
