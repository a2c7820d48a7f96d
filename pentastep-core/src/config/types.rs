//! Drive parameter limits
//!
//! Bounds and step sizes for the duty cycle, step period and the
//! hold-to-accelerate behavior of the buttons.

/// Errors found while validating configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Duty floor is above the PWM wrap value
    DutyRange,
    /// Period bounds are inverted or the default lies outside them
    PeriodRange,
    /// Accelerator step sizes are zero
    AccelStep,
    /// Button tick interval is zero
    TickInterval,
    /// A GPIO is assigned to more than one function
    PinConflict(u8),
    /// A GPIO number is outside the chip range
    PinOutOfRange(u8),
    /// A phase GPIO cannot be mapped onto the 16 expander lines
    PhaseOutsideExpander(u8),
}

/// Drive limits and button behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DriveConfig {
    /// PWM wrap value; also the upper duty bound (4095 = 12 bit, ~30 kHz)
    pub pwm_top: u16,
    /// Lowest duty reachable with the duty-down button
    pub min_duty: u16,
    /// Step period after power-up and after a mode press (ms)
    pub period_default_ms: u16,
    /// Shortest step period (ms)
    pub period_min_ms: u16,
    /// Longest step period (ms)
    pub period_max_ms: u16,
    /// Accelerator value with no button held
    pub accel_base: u16,
    /// Accelerator growth per tick while a button is held
    pub accel_increment: u16,
    /// Accelerator value right after a mode press
    pub accel_after_mode: u16,
    /// Button sampling interval (ms)
    pub input_tick_ms: u16,
}

impl DriveConfig {
    /// Limits used by the stock firmware
    pub const DEFAULT: Self = Self {
        pwm_top: 4095,
        min_duty: 5,
        period_default_ms: 250,
        period_min_ms: 15,
        period_max_ms: 4000,
        accel_base: 5,
        accel_increment: 5,
        accel_after_mode: 10,
        input_tick_ms: 200,
    };

    /// Duty after power-up and after a mode press (half of the wrap value)
    pub const fn default_duty(&self) -> u16 {
        self.pwm_top / 2
    }

    /// Clamp a requested duty into `[min_duty, pwm_top]`
    pub fn clamp_duty(&self, duty: i32) -> u16 {
        duty.clamp(self.min_duty as i32, self.pwm_top as i32) as u16
    }

    /// Clamp a requested period into `[period_min_ms, period_max_ms]`
    pub fn clamp_period(&self, period_ms: i32) -> u16 {
        period_ms.clamp(self.period_min_ms as i32, self.period_max_ms as i32) as u16
    }

    /// Duty as a percentage of the wrap value, in tenths of a percent
    pub fn duty_permille(&self, duty: u16) -> u16 {
        if self.pwm_top == 0 {
            return 0;
        }
        ((duty as u32 * 1000) / self.pwm_top as u32) as u16
    }

    /// Check that the limits are consistent
    ///
    /// Usable in const context, so a fixed configuration can be checked at
    /// compile time.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.min_duty > self.pwm_top {
            return Err(ConfigError::DutyRange);
        }
        if self.period_min_ms > self.period_max_ms
            || self.period_default_ms < self.period_min_ms
            || self.period_default_ms > self.period_max_ms
        {
            return Err(ConfigError::PeriodRange);
        }
        if self.accel_base == 0 || self.accel_increment == 0 {
            return Err(ConfigError::AccelStep);
        }
        if self.input_tick_ms == 0 {
            return Err(ConfigError::TickInterval);
        }
        Ok(())
    }
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
