//! Push-button sampling
//!
//! Buttons pull their line low when pressed. A snapshot is decoded from one
//! batched GPIO read so all buttons in a tick share the same instant.

use heapless::Vec;
use pentastep_hal::gpio::level;

use crate::config::ButtonPins;

/// Physical push-buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// Lengthen the step period
    PeriodUp,
    /// Lower the duty cycle
    DutyDown,
    /// Shorten the step period
    PeriodDown,
    /// Reset parameters and cycle direction
    Mode,
    /// Raise the duty cycle
    DutyUp,
}

impl Button {
    /// Number of buttons
    pub const COUNT: usize = 5;

    /// All buttons in wiring order
    pub const ALL: [Button; Self::COUNT] = [
        Button::PeriodUp,
        Button::DutyDown,
        Button::PeriodDown,
        Button::Mode,
        Button::DutyUp,
    ];

    const fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// Set of buttons held down in one sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonSnapshot {
    pressed: u8,
}

impl ButtonSnapshot {
    /// No button held
    pub const RELEASED: Self = Self { pressed: 0 };

    /// Decode a raw GPIO snapshot (bit n = level of GPIO n)
    ///
    /// A button is pressed when its line reads low.
    pub fn from_levels(levels: u32, pins: &ButtonPins) -> Self {
        let mut pressed = 0;
        for button in Button::ALL {
            if !level(levels, pins.pin(button)) {
                pressed |= button.bit();
            }
        }
        Self { pressed }
    }

    /// Build a snapshot from a list of held buttons
    pub fn with(buttons: &[Button]) -> Self {
        let pressed = buttons.iter().fold(0, |acc, b| acc | b.bit());
        Self { pressed }
    }

    /// Check if a button is held
    pub const fn is_pressed(&self, button: Button) -> bool {
        self.pressed & button.bit() != 0
    }

    /// Check if nothing is held
    pub const fn is_idle(&self) -> bool {
        self.pressed == 0
    }

    /// Held buttons in wiring order
    pub fn pressed(&self) -> Vec<Button, { Button::COUNT }> {
        Button::ALL
            .iter()
            .copied()
            .filter(|b| self.is_pressed(*b))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BoardPins;

    const PINS: ButtonPins = BoardPins::PICO.buttons;

    /// All button lines pulled high (nothing pressed)
    fn idle_levels() -> u32 {
        PINS.all().iter().fold(0, |acc, p| acc | (1 << p))
    }

    #[test]
    fn test_idle_lines() {
        let snap = ButtonSnapshot::from_levels(idle_levels(), &PINS);
        assert!(snap.is_idle());
        assert!(snap.pressed().is_empty());
    }

    #[test]
    fn test_active_low_decode() {
        let levels = idle_levels() & !(1 << 27);
        let snap = ButtonSnapshot::from_levels(levels, &PINS);

        assert!(snap.is_pressed(Button::Mode));
        assert!(!snap.is_pressed(Button::PeriodUp));
        assert_eq!(snap.pressed().as_slice(), &[Button::Mode]);
    }

    #[test]
    fn test_other_lines_ignored() {
        // Unrelated GPIOs low must not register as presses
        let levels = idle_levels() & !(1 << 5) & !(1 << 20);
        assert!(ButtonSnapshot::from_levels(levels, &PINS).is_idle());
    }

    #[test]
    fn test_multiple_pressed() {
        let levels = idle_levels() & !(1 << 22) & !(1 << 28);
        let snap = ButtonSnapshot::from_levels(levels, &PINS);
        assert_eq!(snap, ButtonSnapshot::with(&[Button::DutyUp, Button::DutyDown]));
        assert_eq!(
            snap.pressed().as_slice(),
            &[Button::DutyDown, Button::DutyUp]
        );
    }
}
