//! Pentastep Hardware Abstraction Layer
//!
//! This crate defines the small set of hardware traits the drive logic
//! needs from a chip HAL. The motion core never touches peripherals
//! directly; it only talks to these traits.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (pentastep-firmware)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  pentastep-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ pentastep-hal-│
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`pwm::PwmSlices`] - Per-channel compare level on a sliced PWM block
//! - [`gpio::PinSnapshot`] - Batched read of every input line at once
//!
//! SPI and plain digital outputs use `embedded-hal` 1.0 directly; the
//! [`spi`] module only describes the bus format a device requires.

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod pwm;
pub mod spi;

// Re-export key traits at crate root for convenience
pub use gpio::PinSnapshot;
pub use pwm::{Channel, PwmSlices, PwmSlot};
pub use spi::{Mode, SpiConfig};
