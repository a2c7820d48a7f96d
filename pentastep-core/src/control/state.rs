//! Shared drive parameters
//!
//! Written only by the button task, read only by the drive loop. Each field
//! is its own atomic cell so a single read never tears, but there is no lock
//! across fields: after a mode press the drive loop may see the new duty
//! together with the old period (or the reverse) for one step.

use portable_atomic::{AtomicU16, AtomicU8, Ordering};

use crate::config::DriveConfig;

/// Step walk direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum DirectionMode {
    /// Advance through the table
    #[default]
    Forward = 0,
    /// Walk the table backwards
    Reverse = 1,
    /// Hold the current step
    Stopped = 2,
}

impl DirectionMode {
    /// Next mode in the mode-button cycle: Forward -> Reverse -> Stopped -> Forward
    pub const fn next(self) -> Self {
        match self {
            DirectionMode::Forward => DirectionMode::Reverse,
            DirectionMode::Reverse => DirectionMode::Stopped,
            DirectionMode::Stopped => DirectionMode::Forward,
        }
    }

    const fn from_u8(raw: u8) -> Self {
        match raw {
            0 => DirectionMode::Forward,
            1 => DirectionMode::Reverse,
            _ => DirectionMode::Stopped,
        }
    }
}

/// Point-in-time copy of the shared parameters
///
/// Fields are loaded one by one, so a snapshot taken while the button task
/// runs may mix old and new values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlSnapshot {
    /// PWM level for energized phases
    pub duty: u16,
    /// Hold time per step (ms)
    pub period_ms: u16,
    /// Step walk direction
    pub direction: DirectionMode,
}

/// Drive parameters shared between the button task and the drive loop
pub struct SharedControl {
    duty: AtomicU16,
    period_ms: AtomicU16,
    direction: AtomicU8,
}

impl SharedControl {
    /// Create with power-up defaults: half-scale duty, default period, Forward
    pub const fn new(config: &DriveConfig) -> Self {
        Self {
            duty: AtomicU16::new(config.default_duty()),
            period_ms: AtomicU16::new(config.period_default_ms),
            direction: AtomicU8::new(DirectionMode::Forward as u8),
        }
    }

    /// Current duty level
    pub fn duty(&self) -> u16 {
        self.duty.load(Ordering::Relaxed)
    }

    /// Store a new duty level
    pub fn set_duty(&self, duty: u16) {
        self.duty.store(duty, Ordering::Relaxed);
    }

    /// Current step period (ms)
    pub fn period_ms(&self) -> u16 {
        self.period_ms.load(Ordering::Relaxed)
    }

    /// Store a new step period (ms)
    pub fn set_period_ms(&self, period_ms: u16) {
        self.period_ms.store(period_ms, Ordering::Relaxed);
    }

    /// Current direction mode
    pub fn direction(&self) -> DirectionMode {
        DirectionMode::from_u8(self.direction.load(Ordering::Relaxed))
    }

    /// Store a new direction mode
    pub fn set_direction(&self, mode: DirectionMode) {
        self.direction.store(mode as u8, Ordering::Relaxed);
    }

    /// Load every field (not atomic as a group)
    pub fn snapshot(&self) -> ControlSnapshot {
        ControlSnapshot {
            duty: self.duty(),
            period_ms: self.period_ms(),
            direction: self.direction(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_power_up_defaults() {
        let control = SharedControl::new(&DriveConfig::DEFAULT);
        let snap = control.snapshot();

        assert_eq!(snap.duty, 2047);
        assert_eq!(snap.period_ms, 250);
        assert_eq!(snap.direction, DirectionMode::Forward);
    }

    #[test]
    fn test_mode_cycle() {
        let mut mode = DirectionMode::Forward;
        mode = mode.next();
        assert_eq!(mode, DirectionMode::Reverse);
        mode = mode.next();
        assert_eq!(mode, DirectionMode::Stopped);
        mode = mode.next();
        assert_eq!(mode, DirectionMode::Forward);
    }

    #[test]
    fn test_direction_round_trip() {
        let control = SharedControl::new(&DriveConfig::DEFAULT);
        for mode in [
            DirectionMode::Reverse,
            DirectionMode::Stopped,
            DirectionMode::Forward,
        ] {
            control.set_direction(mode);
            assert_eq!(control.direction(), mode);
        }
    }

    #[test]
    fn test_static_placement() {
        static CONTROL: SharedControl = SharedControl::new(&DriveConfig::DEFAULT);

        CONTROL.set_duty(100);
        CONTROL.set_period_ms(40);
        assert_eq!(CONTROL.duty(), 100);
        assert_eq!(CONTROL.period_ms(), 40);
    }
}
