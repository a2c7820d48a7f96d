//! Step index and sequencer
//!
//! The index wraps at both ends of the table so the motor can run
//! indefinitely in either direction.

use crate::control::DirectionMode;
use crate::pattern::{pattern_for, PhaseRow, STEP_COUNT};

/// Position in the phase pattern table, always in `0..STEP_COUNT`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepIndex(u8);

impl StepIndex {
    /// First row of the table
    pub const ZERO: Self = Self(0);

    /// Create an index, rejecting values past the table end
    pub const fn new(value: u8) -> Option<Self> {
        if (value as usize) < STEP_COUNT {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Raw value
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Value as a table offset
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }

    /// Following row, wrapping to 0 after the last
    pub const fn next(self) -> Self {
        if self.0 as usize + 1 >= STEP_COUNT {
            Self(0)
        } else {
            Self(self.0 + 1)
        }
    }

    /// Preceding row, wrapping to the last after 0
    pub const fn prev(self) -> Self {
        if self.0 == 0 {
            Self((STEP_COUNT - 1) as u8)
        } else {
            Self(self.0 - 1)
        }
    }

    /// Index after one step in the given mode
    pub const fn advance(self, mode: DirectionMode) -> Self {
        match mode {
            DirectionMode::Forward => self.next(),
            DirectionMode::Reverse => self.prev(),
            DirectionMode::Stopped => self,
        }
    }
}

/// Current position of the step walk
#[derive(Debug, Clone, Default)]
pub struct Sequencer {
    index: StepIndex,
}

impl Sequencer {
    /// Start at row 0
    pub const fn new() -> Self {
        Self {
            index: StepIndex::ZERO,
        }
    }

    /// Row to be driven next
    pub fn index(&self) -> StepIndex {
        self.index
    }

    /// Phase states of the current row
    pub fn pattern(&self) -> &'static PhaseRow {
        pattern_for(self.index)
    }

    /// Move one step in the given mode and return the new index
    pub fn advance(&mut self, mode: DirectionMode) -> StepIndex {
        self.index = self.index.advance(mode);
        self.index
    }
}
