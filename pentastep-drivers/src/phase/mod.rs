//! Phase output stage

pub mod driver;

pub use driver::{PhaseDriver, StepReport};
