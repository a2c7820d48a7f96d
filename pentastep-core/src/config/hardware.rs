//! Board pin map
//!
//! GPIO assignments for the phase PWM outputs, the push-buttons, the
//! expander control lines and the heartbeat LED.

use pentastep_hal::PwmSlot;

use super::types::ConfigError;
use crate::control::Button;
use crate::pattern::PHASE_COUNT;

/// Number of GPIO pins on RP2040
pub const GPIO_COUNT: u8 = 30;

/// Number of output lines on the port expander (two 8-bit ports)
pub const EXPANDER_LINES: u8 = 16;

/// Button GPIO assignments (active-low, internal pull-up)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonPins {
    /// Lengthen the step period (slower)
    pub period_up: u8,
    /// Lower the duty cycle
    pub duty_down: u8,
    /// Shorten the step period (faster)
    pub period_down: u8,
    /// Reset speed/duty and cycle the direction mode
    pub mode: u8,
    /// Raise the duty cycle
    pub duty_up: u8,
}

impl ButtonPins {
    /// GPIO wired to a button
    pub const fn pin(&self, button: Button) -> u8 {
        match button {
            Button::PeriodUp => self.period_up,
            Button::DutyDown => self.duty_down,
            Button::PeriodDown => self.period_down,
            Button::Mode => self.mode,
            Button::DutyUp => self.duty_up,
        }
    }

    /// All button GPIOs
    pub const fn all(&self) -> [u8; Button::COUNT] {
        [
            self.period_up,
            self.duty_down,
            self.period_down,
            self.mode,
            self.duty_up,
        ]
    }
}

/// SPI bus pins for the port expander
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpiPins {
    /// Controller in, peripheral out
    pub rx: u8,
    /// Chip select (active-low)
    pub cs: u8,
    /// Clock
    pub sck: u8,
    /// Controller out, peripheral in
    pub tx: u8,
}

/// Complete board pin map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoardPins {
    /// Phase GPIOs in table column order; each drives one PWM channel and
    /// selects the matching expander output bit
    pub phases: [u8; PHASE_COUNT],
    /// Push-buttons
    pub buttons: ButtonPins,
    /// Expander hardware reset (active-low)
    pub expander_reset: u8,
    /// Expander SPI bus
    pub spi: SpiPins,
    /// Heartbeat LED
    pub heartbeat: u8,
}

impl BoardPins {
    /// Raspberry Pi Pico wiring
    ///
    /// ```text
    /// PICO  -  MCP23S17
    ///  17   ->  11 (CS)
    ///  16   <-  14 (SO)
    ///  19   ->  13 (SI)
    ///  18   ->  12 (SCK)
    ///  20   ->  18 (RESET)
    /// ```
    pub const PICO: Self = Self {
        phases: [5, 6, 7, 8, 9],
        buttons: ButtonPins {
            period_up: 21,
            duty_down: 22,
            period_down: 26,
            mode: 27,
            duty_up: 28,
        },
        expander_reset: 20,
        spi: SpiPins {
            rx: 16,
            cs: 17,
            sck: 18,
            tx: 19,
        },
        heartbeat: 25,
    };

    /// PWM output wired to each phase
    pub const fn phase_slots(&self) -> [PwmSlot; PHASE_COUNT] {
        let mut slots = [PwmSlot::for_gpio(0); PHASE_COUNT];
        let mut i = 0;
        while i < PHASE_COUNT {
            slots[i] = PwmSlot::for_gpio(self.phases[i]);
            i += 1;
        }
        slots
    }

    /// Check that every GPIO is in range, used once, and that phase pins fit
    /// on the expander's 16 lines
    pub const fn validate(&self) -> Result<(), ConfigError> {
        let mut i = 0;
        while i < PHASE_COUNT {
            if self.phases[i] >= EXPANDER_LINES {
                return Err(ConfigError::PhaseOutsideExpander(self.phases[i]));
            }
            i += 1;
        }

        let p = &self.phases;
        let b = &self.buttons;
        let all = [
            p[0],
            p[1],
            p[2],
            p[3],
            p[4],
            b.period_up,
            b.duty_down,
            b.period_down,
            b.mode,
            b.duty_up,
            self.spi.rx,
            self.spi.cs,
            self.spi.sck,
            self.spi.tx,
            self.expander_reset,
            self.heartbeat,
        ];

        let mut used: u32 = 0;
        let mut i = 0;
        while i < all.len() {
            let pin = all[i];
            if pin >= GPIO_COUNT {
                return Err(ConfigError::PinOutOfRange(pin));
            }
            if used & (1 << pin) != 0 {
                return Err(ConfigError::PinConflict(pin));
            }
            used |= 1 << pin;
            i += 1;
        }
        Ok(())
    }
}

impl Default for BoardPins {
    fn default() -> Self {
        Self::PICO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pentastep_hal::Channel;

    #[test]
    fn test_pico_map_is_valid() {
        assert_eq!(BoardPins::PICO.validate(), Ok(()));
    }

    #[test]
    fn test_phase_slots() {
        let slots = BoardPins::PICO.phase_slots();
        assert_eq!(slots[0], PwmSlot { slice: 2, channel: Channel::B });
        assert_eq!(slots[1], PwmSlot { slice: 3, channel: Channel::A });
        assert_eq!(slots[2], PwmSlot { slice: 3, channel: Channel::B });
        assert_eq!(slots[3], PwmSlot { slice: 4, channel: Channel::A });
        assert_eq!(slots[4], PwmSlot { slice: 4, channel: Channel::B });
    }

    #[test]
    fn test_checks_in_const_context() {
        const VALID: bool = BoardPins::PICO.validate().is_ok();
        const SLOTS: [PwmSlot; PHASE_COUNT] = BoardPins::PICO.phase_slots();

        assert!(VALID);
        assert_eq!(SLOTS, BoardPins::PICO.phase_slots());
        assert_eq!(SLOTS[2], PwmSlot { slice: 3, channel: Channel::B });
    }

    #[test]
    fn test_button_lookup() {
        let b = BoardPins::PICO.buttons;
        assert_eq!(b.pin(Button::PeriodUp), 21);
        assert_eq!(b.pin(Button::DutyDown), 22);
        assert_eq!(b.pin(Button::PeriodDown), 26);
        assert_eq!(b.pin(Button::Mode), 27);
        assert_eq!(b.pin(Button::DutyUp), 28);
    }

    #[test]
    fn test_conflict_detected() {
        let mut pins = BoardPins::PICO;
        pins.heartbeat = 21;
        assert_eq!(pins.validate(), Err(ConfigError::PinConflict(21)));
    }

    #[test]
    fn test_out_of_range() {
        let mut pins = BoardPins::PICO;
        pins.buttons.mode = 30;
        assert_eq!(pins.validate(), Err(ConfigError::PinOutOfRange(30)));
    }

    #[test]
    fn test_phase_must_fit_expander() {
        let mut pins = BoardPins::PICO;
        pins.phases[4] = 16;
        assert_eq!(pins.validate(), Err(ConfigError::PhaseOutsideExpander(16)));
    }
}
