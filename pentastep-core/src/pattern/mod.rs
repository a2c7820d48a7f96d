//! Phase energization patterns
//!
//! The drive walks a fixed table of half-steps. Each row gives the state of
//! all five windings for one rotor position.

pub mod table;

pub use table::{pattern_for, PhaseRow, PhaseState, PATTERN_TABLE, PHASE_COUNT, STEP_COUNT};
