//! Structured logging for retention runs.

pub mod setup;

pub use setup::init_tracing;
