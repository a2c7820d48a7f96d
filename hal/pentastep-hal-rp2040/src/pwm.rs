//! PWM bank
//!
//! Each RP2040 PWM slice is owned by one embassy-rp [`Pwm`] driver. The
//! bank keeps the last configuration written to each slice so that a level
//! change on channel A does not disturb channel B.

use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use pentastep_hal::pwm::SLICE_COUNT;
use pentastep_hal::{Channel, PwmSlices, PwmSlot};

/// Slice configuration with both channels at level 0
///
/// Clock divider 1 and `top` as the wrap value (125 MHz / 4096 ~ 30.5 kHz
/// for a 12-bit `top`).
pub fn slice_config(top: u16) -> PwmConfig {
    let mut config = PwmConfig::default();
    config.top = top;
    config.compare_a = 0;
    config.compare_b = 0;
    config
}

struct SliceState<'d> {
    pwm: Pwm<'d>,
    config: PwmConfig,
}

/// Every PWM slice the drive uses, addressed by slice number
pub struct PwmBank<'d> {
    slices: [Option<SliceState<'d>>; SLICE_COUNT as usize],
    top: u16,
}

impl<'d> PwmBank<'d> {
    /// Create an empty bank; slices added later share `top`
    pub fn new(top: u16) -> Self {
        Self {
            slices: core::array::from_fn(|_| None),
            top,
        }
    }

    /// Take ownership of a slice driver and reset its outputs to level 0
    ///
    /// `slice` is the hardware slice number the driver was built from.
    /// Out-of-range numbers are ignored.
    pub fn add(&mut self, slice: u8, mut pwm: Pwm<'d>) {
        let config = slice_config(self.top);
        pwm.set_config(&config);
        if let Some(entry) = self.slices.get_mut(slice as usize) {
            *entry = Some(SliceState { pwm, config });
        }
    }

    /// Builder form of [`PwmBank::add`]
    pub fn with(mut self, slice: u8, pwm: Pwm<'d>) -> Self {
        self.add(slice, pwm);
        self
    }
}

impl PwmSlices for PwmBank<'_> {
    fn set_level(&mut self, slot: PwmSlot, level: u16) {
        let Some(Some(state)) = self.slices.get_mut(slot.slice as usize) else {
            return;
        };
        match slot.channel {
            Channel::A => state.config.compare_a = level,
            Channel::B => state.config.compare_b = level,
        }
        state.pwm.set_config(&state.config);
    }
}
