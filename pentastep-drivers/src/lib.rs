//! Hardware driver implementations
//!
//! This crate drives the external parts of the stepper power stage on top
//! of `embedded-hal` 1.0 traits and the traits in `pentastep-hal`:
//!
//! - MCP23S17 SPI port expander (frame codec, register access, reset)
//! - Phase driver that programs PWM levels and port bits for one step

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod expander;
pub mod phase;
