//! Button rules and the hold-to-accelerate controller
//!
//! Rules are evaluated in a fixed priority order and only the first rule
//! whose button is held fires on a given tick. Holding a button grows the
//! adjustment step on every tick; releasing every button drops it back to
//! the base step.

use crate::config::DriveConfig;

use super::buttons::{Button, ButtonSnapshot};
use super::state::{DirectionMode, SharedControl};

/// Adjustment applied by a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    /// Lengthen the step period by the accelerator
    PeriodUp,
    /// Shorten the step period by the accelerator
    PeriodDown,
    /// Restore default period and duty, cycle the direction mode
    ModeReset,
    /// Raise the duty by the accelerator
    DutyUp,
    /// Lower the duty by the accelerator
    DutyDown,
}

/// One (button, action) pair of the priority list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rule {
    pub trigger: Button,
    pub action: Action,
}

/// Button rules, highest priority first
pub const RULES: [Rule; Button::COUNT] = [
    Rule {
        trigger: Button::PeriodUp,
        action: Action::PeriodUp,
    },
    Rule {
        trigger: Button::PeriodDown,
        action: Action::PeriodDown,
    },
    Rule {
        trigger: Button::Mode,
        action: Action::ModeReset,
    },
    Rule {
        trigger: Button::DutyUp,
        action: Action::DutyUp,
    },
    Rule {
        trigger: Button::DutyDown,
        action: Action::DutyDown,
    },
];

/// Outcome of a tick that fired a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickReport {
    /// Rule that fired
    pub action: Action,
    /// Duty after the tick
    pub duty: u16,
    /// Period after the tick (ms)
    pub period_ms: u16,
    /// Direction after the tick
    pub direction: DirectionMode,
    /// Accelerator value for the next tick
    pub accel: u16,
}

/// Button-tick state machine
///
/// Owns the accelerator; the drive parameters it adjusts live in
/// [`SharedControl`].
#[derive(Debug, Clone)]
pub struct InputController {
    config: DriveConfig,
    accel: u16,
}

impl InputController {
    /// Create with the accelerator at its base value
    pub const fn new(config: DriveConfig) -> Self {
        Self {
            accel: config.accel_base,
            config,
        }
    }

    /// Current accelerator value
    pub fn accel(&self) -> u16 {
        self.accel
    }

    /// Drive limits in use
    pub fn config(&self) -> &DriveConfig {
        &self.config
    }

    /// First rule whose button is held, if any
    pub fn select(snapshot: &ButtonSnapshot) -> Option<Action> {
        RULES
            .iter()
            .find(|rule| snapshot.is_pressed(rule.trigger))
            .map(|rule| rule.action)
    }

    /// Process one button sample
    ///
    /// Returns `None` when no button is held (the accelerator is reset).
    pub fn tick(&mut self, snapshot: &ButtonSnapshot, control: &SharedControl) -> Option<TickReport> {
        let Some(action) = Self::select(snapshot) else {
            self.accel = self.config.accel_base;
            return None;
        };

        let step = self.accel as i32;
        match action {
            Action::PeriodUp => {
                let period = self.config.clamp_period(control.period_ms() as i32 + step);
                control.set_period_ms(period);
                self.grow();
            }
            Action::PeriodDown => {
                let period = self.config.clamp_period(control.period_ms() as i32 - step);
                control.set_period_ms(period);
                self.grow();
            }
            Action::ModeReset => {
                control.set_period_ms(self.config.period_default_ms);
                control.set_duty(self.config.default_duty());
                control.set_direction(control.direction().next());
                self.accel = self.config.accel_after_mode;
            }
            Action::DutyUp => {
                let duty = self.config.clamp_duty(control.duty() as i32 + step);
                control.set_duty(duty);
                self.grow();
            }
            Action::DutyDown => {
                let duty = self.config.clamp_duty(control.duty() as i32 - step);
                control.set_duty(duty);
                self.grow();
            }
        }

        let snap = control.snapshot();
        Some(TickReport {
            action,
            duty: snap.duty,
            period_ms: snap.period_ms,
            direction: snap.direction,
            accel: self.accel,
        })
    }

    fn grow(&mut self) {
        self.accel = self.accel.saturating_add(self.config.accel_increment);
    }
}
