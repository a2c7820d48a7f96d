//! PWM slice/channel abstractions
//!
//! Chips like the RP2040 group PWM outputs into slices, each with a shared
//! counter and two compare channels (A and B). A GPIO is hard-wired to one
//! slice/channel pair.

/// Compare channel within a PWM slice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    /// Channel A (even GPIO numbers)
    A,
    /// Channel B (odd GPIO numbers)
    B,
}

/// Number of PWM slices on the RP2040
pub const SLICE_COUNT: u8 = 8;

/// A slice/channel pair addressing one PWM output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PwmSlot {
    /// Slice number (0-7)
    pub slice: u8,
    /// Channel within the slice
    pub channel: Channel,
}

impl PwmSlot {
    /// Resolve the PWM output wired to a GPIO
    ///
    /// GPIO `n` drives slice `(n >> 1) & 7`, channel A when `n` is even and
    /// channel B when odd. GPIOs 16 and above wrap back onto slices 0-7.
    pub const fn for_gpio(gpio: u8) -> Self {
        let channel = if gpio % 2 == 0 { Channel::A } else { Channel::B };
        Self {
            slice: (gpio >> 1) & (SLICE_COUNT - 1),
            channel,
        }
    }
}

/// PWM block that can program a compare level per slot
///
/// Clock divider, wrap value and slice enable are set up by the chip HAL
/// before the drive loop starts; this trait only moves the level.
pub trait PwmSlices {
    /// Set the compare level of one channel
    ///
    /// A level of 0 keeps the output low for the whole period; a level equal
    /// to the wrap value keeps it high.
    fn set_level(&mut self, slot: PwmSlot, level: u16);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gpio_to_slot() {
        assert_eq!(
            PwmSlot::for_gpio(5),
            PwmSlot { slice: 2, channel: Channel::B }
        );
        assert_eq!(
            PwmSlot::for_gpio(6),
            PwmSlot { slice: 3, channel: Channel::A }
        );
        assert_eq!(
            PwmSlot::for_gpio(9),
            PwmSlot { slice: 4, channel: Channel::B }
        );
    }

    #[test]
    fn test_upper_bank_wraps() {
        // GPIO 16 shares slice 0 with GPIO 0
        assert_eq!(PwmSlot::for_gpio(16), PwmSlot::for_gpio(0));
        assert_eq!(PwmSlot::for_gpio(29).slice, 6);
    }
}
