//! Fixed 20-step drive table for a 5-phase motor
//!
//! Adjacent rows differ by exactly one winding transition. Rows must stay in
//! this order; reordering them breaks rotation.

use crate::motion::StepIndex;

/// Number of motor phases (windings)
pub const PHASE_COUNT: usize = 5;

/// Number of half-steps in one electrical cycle
pub const STEP_COUNT: usize = 20;

/// Drive state of a single winding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(i8)]
pub enum PhaseState {
    /// Energized in the reverse sense
    Reverse = -1,
    /// De-energized
    Off = 0,
    /// Energized in the forward sense
    Forward = 1,
}

impl PhaseState {
    /// Ternary value (-1, 0, +1)
    pub const fn as_i8(self) -> i8 {
        self as i8
    }

    /// Check if the winding carries current in either sense
    pub const fn is_energized(self) -> bool {
        !matches!(self, PhaseState::Off)
    }
}

/// One row of the table: the state of every phase for one step
pub type PhaseRow = [PhaseState; PHASE_COUNT];

const R: PhaseState = PhaseState::Reverse;
const O: PhaseState = PhaseState::Off;
const F: PhaseState = PhaseState::Forward;

/// Half-step table, phases ordered as the windings 6-10 on the motor
pub static PATTERN_TABLE: [PhaseRow; STEP_COUNT] = [
    [R, O, F, F, O],
    [R, O, F, O, O],
    [R, O, F, O, R],
    [O, O, F, O, R],
    [O, F, F, O, R],
    [O, F, O, O, R],
    [O, F, O, R, R],
    [O, F, O, R, O],
    [F, F, O, R, O],
    [F, O, O, R, O],
    [F, O, R, R, O],
    [F, O, R, O, O],
    [F, O, R, O, F],
    [O, O, R, O, F],
    [O, R, R, O, F],
    [O, R, O, O, F],
    [O, R, O, F, F],
    [O, R, O, F, O],
    [R, R, O, F, O],
    [R, O, O, F, O],
];

/// Look up the phase states for a step
///
/// [`StepIndex`] is always in range, so the lookup cannot fail.
#[inline]
pub fn pattern_for(index: StepIndex) -> &'static PhaseRow {
    &PATTERN_TABLE[index.as_usize()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_shape() {
        assert_eq!(PATTERN_TABLE.len(), STEP_COUNT);
        for row in PATTERN_TABLE.iter() {
            assert_eq!(row.len(), PHASE_COUNT);
            for state in row {
                assert!((-1..=1).contains(&state.as_i8()));
            }
        }
    }

    #[test]
    fn test_lookup_is_stable() {
        for i in 0..STEP_COUNT as u8 {
            let idx = StepIndex::new(i).unwrap();
            let first = *pattern_for(idx);
            let second = *pattern_for(idx);
            assert_eq!(first, second);
            assert_eq!(first, PATTERN_TABLE[i as usize]);
        }
    }

    #[test]
    fn test_first_row() {
        let row = pattern_for(StepIndex::ZERO);
        let values: [i8; PHASE_COUNT] = row.map(PhaseState::as_i8);
        assert_eq!(values, [-1, 0, 1, 1, 0]);
    }

    #[test]
    fn test_single_transition_between_rows() {
        // Includes the wrap from the last row back to the first
        for i in 0..STEP_COUNT {
            let a = &PATTERN_TABLE[i];
            let b = &PATTERN_TABLE[(i + 1) % STEP_COUNT];
            let changes = a.iter().zip(b.iter()).filter(|(x, y)| x != y).count();
            assert_eq!(changes, 1, "rows {} and {}", i, (i + 1) % STEP_COUNT);
        }
    }

    #[test]
    fn test_energized() {
        assert!(PhaseState::Forward.is_energized());
        assert!(PhaseState::Reverse.is_energized());
        assert!(!PhaseState::Off.is_energized());
    }
}
