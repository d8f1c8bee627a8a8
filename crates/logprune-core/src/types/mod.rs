//! Value types shared by conditions and configuration.

pub mod duration;
pub mod file_size;

pub use duration::Duration;
pub use file_size::FileSize;
