//! Live drive control
//!
//! The button task samples the push-buttons on a fixed tick and adjusts the
//! shared drive parameters; the drive loop reads them once per step.

pub mod buttons;
pub mod input;
pub mod state;

pub use buttons::{Button, ButtonSnapshot};
pub use input::{Action, InputController, Rule, TickReport, RULES};
pub use state::{ControlSnapshot, DirectionMode, SharedControl};
