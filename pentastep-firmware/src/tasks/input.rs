//! Button task
//!
//! Samples every button in one read per tick and applies at most one
//! adjustment. Runs on the interrupt executor, so a tick can land anywhere
//! inside a drive step.

use defmt::*;
use embassy_time::{Duration, Ticker};

use pentastep_core::control::{ButtonSnapshot, InputController, SharedControl};
use pentastep_hal::PinSnapshot;
use pentastep_hal_rp2040::ButtonBank;

use crate::{DRIVE, PINS};

/// Button task - adjusts the shared drive parameters every input tick
#[embassy_executor::task]
pub async fn input_task(mut buttons: ButtonBank<'static>, control: &'static SharedControl) {
    info!("Input task started, tick={}ms", DRIVE.input_tick_ms);

    let mut controller = InputController::new(DRIVE);
    let mut ticker = Ticker::every(Duration::from_millis(DRIVE.input_tick_ms as u64));

    loop {
        ticker.next().await;

        let snapshot = ButtonSnapshot::from_levels(buttons.read_all(), &PINS.buttons);
        let Some(report) = controller.tick(&snapshot, control) else {
            continue;
        };

        let permille = DRIVE.duty_permille(report.duty);
        info!(
            "{} (held {}): duty={} ({}.{}%) period={}ms dir={} accel={}",
            report.action,
            snapshot.pressed(),
            report.duty,
            permille / 10,
            permille % 10,
            report.period_ms,
            report.direction,
            report.accel
        );
    }
}
