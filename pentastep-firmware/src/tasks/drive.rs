//! Drive loop
//!
//! One iteration per step: program the phases, push the port bits, advance
//! and hold for the current step period. The hold is the only pacing.

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{Blocking, Spi};
use embassy_time::Timer;
use embedded_hal_bus::spi::{ExclusiveDevice, NoDelay};

use pentastep_core::control::SharedControl;
use pentastep_core::motion::Sequencer;
use pentastep_drivers::phase::PhaseDriver;
use pentastep_hal_rp2040::PwmBank;

use crate::DRIVE;

/// Expander SPI device with a GPIO chip select
pub type ExpanderSpi = ExclusiveDevice<Spi<'static, SPI0, Blocking>, Output<'static>, NoDelay>;

/// Phase outputs as wired on the board
pub type BoardDriver = PhaseDriver<PwmBank<'static>, ExpanderSpi, Output<'static>>;

/// Drive task - steps the motor forever
#[embassy_executor::task]
pub async fn drive_task(mut driver: BoardDriver, control: &'static SharedControl) {
    info!("Drive task started");

    let mut sequencer = Sequencer::new();

    loop {
        let report = driver.run_step(&mut sequencer, control);
        let permille = DRIVE.duty_permille(report.duty);

        match report.ports {
            Ok(readback) => {
                debug!(
                    "step {=u8} duty {}.{}% wrote A={=u8:b} B={=u8:b} read A={=u8:b} B={=u8:b}",
                    report.index.value(),
                    permille / 10,
                    permille % 10,
                    readback.written.low,
                    readback.written.high,
                    readback.read.low,
                    readback.read.high
                );
                if !readback.is_verified() {
                    warn!(
                        "Port readback mismatch at step {=u8}: wrote {=u16:b}, read {=u16:b}",
                        report.index.value(),
                        readback.written.as_u16(),
                        readback.read.as_u16()
                    );
                }
            }
            Err(e) => warn!(
                "Expander bus error at step {=u8}: {:?}",
                report.index.value(),
                Debug2Format(&e)
            ),
        }

        Timer::after_millis(report.hold_ms as u64).await;
    }
}
