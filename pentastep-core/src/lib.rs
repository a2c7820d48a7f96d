//! Board-agnostic core logic for the 5-phase stepper firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Phase pattern table (20 half-steps over 5 windings)
//! - Motion sequencer (forward/reverse/stopped step walk)
//! - PWM level mapping for energized phases
//! - Shared control state written by the button task, read by the drive loop
//! - Button sampling and the prioritized adjustment rules
//! - Drive limits and board pin map

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod control;
pub mod motion;
pub mod pattern;
