//! RP2040-specific HAL for the stepper drive firmware
//!
//! This crate provides RP2040 implementations of the shared
//! `pentastep-hal` traits on top of embassy-rp:
//!
//! - PWM bank addressing every slice/channel by number
//! - Button bank folding pulled-up inputs into one level snapshot
//! - SPI clock format conversion

#![no_std]

pub mod gpio;
pub mod pwm;
pub mod spi;

pub use gpio::ButtonBank;
pub use pwm::PwmBank;
pub use spi::spi_config;
