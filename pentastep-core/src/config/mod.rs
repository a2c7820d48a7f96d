//! Configuration types
//!
//! Drive limits and the board pin map. All configuration is compile-time;
//! nothing is persisted across power cycles.

pub mod hardware;
pub mod types;

pub use hardware::*;
pub use types::*;
