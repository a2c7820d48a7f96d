//! Pentastep - 5-Phase Stepper Drive Firmware
//!
//! Drives the five windings of a 5-phase stepper from an RP2040: each phase
//! gets a PWM channel for current and an MCP23S17 expander line for the
//! energize bit. Push-buttons adjust speed and torque and cycle the
//! direction while the motor runs.
//!
//! Two execution contexts share the drive parameters:
//!
//! - the button task, on an interrupt executor so it preempts the drive loop
//! - the drive loop, on the thread-mode executor, paced by the step period

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::{InterruptExecutor, Spawner};
use embassy_rp::gpio::{Level, Output};
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use embassy_rp::pwm::Pwm;
use embassy_rp::spi::Spi;
use embassy_time::Delay;
use embedded_hal_bus::spi::ExclusiveDevice;
use {defmt_rtt as _, panic_probe as _};

use pentastep_core::config::{BoardPins, DriveConfig};
use pentastep_core::control::SharedControl;
use pentastep_drivers::expander::{hardware_reset, Mcp23s17};
use pentastep_drivers::phase::PhaseDriver;
use pentastep_hal::{Channel, Mode, SpiConfig};
use pentastep_hal_rp2040::pwm::slice_config;
use pentastep_hal_rp2040::{spi_config, ButtonBank, PwmBank};

mod tasks;

/// Drive limits
pub const DRIVE: DriveConfig = DriveConfig::DEFAULT;

/// Board wiring
pub const PINS: BoardPins = BoardPins::PICO;

/// MCP23S17 bus format
const EXPANDER_SPI: SpiConfig = SpiConfig::new(1_000_000, Mode::Mode1);

const _: () = core::assert!(DRIVE.validate().is_ok(), "drive limits invalid");
const _: () = core::assert!(PINS.validate().is_ok(), "pin map invalid");
const _: () = core::assert!(wiring_matches(&PINS), "PINS differs from the peripherals taken in main");

/// Check `pins` against the GPIOs and PWM slices `main` hands to the drivers
const fn wiring_matches(pins: &BoardPins) -> bool {
    let slots = pins.phase_slots();
    let b = &pins.buttons;
    let spi = &pins.spi;

    slots[0].slice == 2
        && matches!(slots[0].channel, Channel::B)
        && slots[1].slice == 3
        && matches!(slots[1].channel, Channel::A)
        && slots[2].slice == 3
        && matches!(slots[2].channel, Channel::B)
        && slots[3].slice == 4
        && matches!(slots[3].channel, Channel::A)
        && slots[4].slice == 4
        && matches!(slots[4].channel, Channel::B)
        && pins.phases[0] == 5
        && pins.phases[1] == 6
        && pins.phases[2] == 7
        && pins.phases[3] == 8
        && pins.phases[4] == 9
        && b.period_up == 21
        && b.duty_down == 22
        && b.period_down == 26
        && b.mode == 27
        && b.duty_up == 28
        && spi.rx == 16
        && spi.cs == 17
        && spi.sck == 18
        && spi.tx == 19
        && pins.expander_reset == 20
        && pins.heartbeat == 25
}

/// Drive parameters: written by the button task, read by the drive loop
static CONTROL: SharedControl = SharedControl::new(&DRIVE);

/// Executor for the button task, preempts thread mode
static INPUT_EXECUTOR: InterruptExecutor = InterruptExecutor::new();

#[interrupt]
unsafe fn SWI_IRQ_1() {
    INPUT_EXECUTOR.on_interrupt()
}

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Pentastep firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Phase PWM: GPIO5 = slice 2 B, GPIO6/7 = slice 3 A/B, GPIO8/9 = slice 4 A/B
    let pwm_config = slice_config(DRIVE.pwm_top);
    let pwm = PwmBank::new(DRIVE.pwm_top)
        .with(2, Pwm::new_output_b(p.PWM_SLICE2, p.PIN_5, pwm_config.clone()))
        .with(
            3,
            Pwm::new_output_ab(p.PWM_SLICE3, p.PIN_6, p.PIN_7, pwm_config.clone()),
        )
        .with(
            4,
            Pwm::new_output_ab(p.PWM_SLICE4, p.PIN_8, p.PIN_9, pwm_config),
        );
    info!("Phase PWM initialized, top={}", DRIVE.pwm_top);

    // Expander on SPI0: SCK=GPIO18, TX=GPIO19, RX=GPIO16, CS=GPIO17
    let spi = Spi::new_blocking(
        p.SPI0,
        p.PIN_18,
        p.PIN_19,
        p.PIN_16,
        spi_config(&EXPANDER_SPI),
    );
    let cs = Output::new(p.PIN_17, Level::High);
    let device = ExclusiveDevice::new_no_delay(spi, cs).unwrap();
    let mut expander = Mcp23s17::new(device);

    let mut reset = Output::new(p.PIN_20, Level::High);
    if hardware_reset(&mut reset, &mut Delay).await.is_err() {
        error!("Expander reset line failed");
    }
    match expander.configure_outputs() {
        Ok(()) => info!("Expander configured, all 16 lines outputs"),
        Err(e) => error!("Expander setup failed: {:?}", Debug2Format(&e)),
    }

    let heartbeat = Output::new(p.PIN_25, Level::Low);
    let mut driver = PhaseDriver::new(pwm, expander, heartbeat, &PINS);
    if let Err(e) = driver.release_all() {
        warn!("Could not clear phase outputs: {:?}", Debug2Format(&e));
    }

    // Buttons, active-low with pull-ups
    let buttons = ButtonBank::new()
        .with(p.PIN_21)
        .with(p.PIN_22)
        .with(p.PIN_26)
        .with(p.PIN_27)
        .with(p.PIN_28);
    info!("{} buttons initialized", buttons.len());

    interrupt::SWI_IRQ_1.set_priority(Priority::P2);
    let input_spawner = INPUT_EXECUTOR.start(interrupt::SWI_IRQ_1);
    unwrap!(input_spawner.spawn(tasks::input_task(buttons, &CONTROL)));
    unwrap!(spawner.spawn(tasks::drive_task(driver, &CONTROL)));

    info!("All tasks spawned, firmware running");
}
