//! Button bank
//!
//! Buttons short their line to ground, so inputs use the internal pull-up.
//! All lines are sampled with one read of the SIO input register.

use embassy_rp::gpio::{Input, Pin, Pull};
use embassy_rp::{pac, Peri};
use heapless::Vec;
use pentastep_hal::gpio::mask_unsampled;
use pentastep_hal::PinSnapshot;

/// Maximum number of inputs in a bank
pub const MAX_INPUTS: usize = 8;

/// Pulled-up inputs sampled together
pub struct ButtonBank<'d> {
    inputs: Vec<Input<'d>, MAX_INPUTS>,
    mask: u32,
}

impl<'d> ButtonBank<'d> {
    /// Create an empty bank
    pub fn new() -> Self {
        Self {
            inputs: Vec::new(),
            mask: 0,
        }
    }

    /// Add a bank 0 pin with the internal pull-up enabled
    ///
    /// Returns the bank unchanged when it is already full.
    pub fn with(mut self, pin: Peri<'d, impl Pin>) -> Self {
        let gpio = pin.pin();
        let input = Input::new(pin, Pull::Up);
        if self.inputs.push(input).is_ok() {
            self.mask |= 1 << gpio;
        } else {
            #[cfg(feature = "defmt")]
            defmt::warn!("button bank full, GPIO{} not sampled", gpio);
        }
        self
    }

    /// Number of sampled lines
    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    /// Check if no line is sampled
    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }
}

impl Default for ButtonBank<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl PinSnapshot for ButtonBank<'_> {
    /// Lines that are not in the bank read high (released)
    fn read_all(&mut self) -> u32 {
        let raw = pac::SIO.gpio_in(0).read();
        mask_unsampled(raw, self.mask)
    }
}
