//! PWM level mapping
//!
//! Energized phases get the live duty regardless of polarity; idle phases
//! get zero.

use crate::pattern::{PhaseRow, PhaseState, PHASE_COUNT};

/// PWM level for one phase
pub const fn level_for(state: PhaseState, duty: u16) -> u16 {
    if state.is_energized() {
        duty
    } else {
        0
    }
}

/// PWM levels for every phase of a row, in column order
pub fn phase_levels(row: &PhaseRow, duty: u16) -> [u16; PHASE_COUNT] {
    row.map(|state| level_for(state, duty))
}
