//! Port expander drivers

pub mod mcp23s17;

pub use mcp23s17::{hardware_reset, ExpanderError, Mcp23s17, PortBytes, Readback};
