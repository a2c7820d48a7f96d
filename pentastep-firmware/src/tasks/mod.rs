//! Embassy async tasks
//!
//! The two tasks share nothing but the atomic cells in [`SharedControl`].
//!
//! [`SharedControl`]: pentastep_core::control::SharedControl

pub mod drive;
pub mod input;

pub use drive::drive_task;
pub use input::input_task;
