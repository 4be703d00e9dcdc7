//! Schema module - Configuration and plain data types for playback.

mod config;
mod segment;

pub use config::*;
pub use segment::*;
