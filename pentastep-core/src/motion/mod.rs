//! Step sequencing
//!
//! Walks the phase pattern table according to the direction mode and maps
//! each row onto PWM levels.

pub mod levels;
pub mod sequencer;

pub use levels::{level_for, phase_levels};
pub use sequencer::{Sequencer, StepIndex};
